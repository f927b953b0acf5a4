//! Run entity: one requested batch of tests for a commit.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "runs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Branch the commit lives on. Informational only.
    pub branch: String,
    pub sha: String,
    /// Author of the commit.
    pub user: String,
    /// Commit subject.
    pub title: String,
    /// Login of whoever requested the run.
    pub requester: String,
    pub started: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::build::Entity")]
    Builds,
    #[sea_orm(has_many = "super::test::Entity")]
    Tests,
}

impl Related<super::build::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Builds.def()
    }
}

impl Related<super::test::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
