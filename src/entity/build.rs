//! Build entity: a compilation configuration shared by tests of one run.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "builds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub build_id: i32,
    pub run_id: i32,
    /// PENDING or SKIPPED on creation, later a terminal status set by builders.
    pub status: String,
    pub is_release: bool,
    /// `--features=...` tail of the test command, empty for default features.
    pub features: String,
    pub started: Option<DateTimeUtc>,
    pub finished: Option<DateTimeUtc>,
    pub stdout: Option<Vec<u8>>,
    pub stderr: Option<Vec<u8>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::run::Entity",
        from = "Column::RunId",
        to = "super::run::Column::Id",
        on_delete = "Cascade"
    )]
    Run,
    #[sea_orm(has_many = "super::test::Entity")]
    Tests,
}

impl Related<super::run::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Run.def()
    }
}

impl Related<super::test::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
