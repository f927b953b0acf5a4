//! Create logs table.

use sea_orm_migration::prelude::*;

use super::m20240501_000003_create_tests::Tests;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Logs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Logs::TestId).integer().not_null())
                    .col(ColumnDef::new(Logs::Type).string().not_null())
                    .col(
                        ColumnDef::new(Logs::Size)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Logs::Storage).string().not_null())
                    .col(
                        ColumnDef::new(Logs::StackTrace)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Logs::Patterns).string())
                    .col(ColumnDef::new(Logs::Log).blob())
                    .primary_key(Index::create().col(Logs::TestId).col(Logs::Type))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Logs::Table, Logs::TestId)
                            .to(Tests::Table, Tests::TestId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Logs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Logs {
    Table,
    TestId,
    Type,
    Size,
    Storage,
    StackTrace,
    Patterns,
    Log,
}
