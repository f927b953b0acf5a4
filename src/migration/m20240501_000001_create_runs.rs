//! Create runs table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Runs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Runs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Runs::Branch).string().not_null())
                    .col(ColumnDef::new(Runs::Sha).string().not_null())
                    .col(ColumnDef::new(Runs::User).string().not_null())
                    .col(ColumnDef::new(Runs::Title).text().not_null())
                    .col(ColumnDef::new(Runs::Requester).string().not_null())
                    .col(
                        ColumnDef::new(Runs::Started)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_runs_branch")
                    .table(Runs::Table)
                    .col(Runs::Branch)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Runs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Runs {
    Table,
    Id,
    Branch,
    Sha,
    User,
    Title,
    Requester,
    Started,
}
