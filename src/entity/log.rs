//! Log entity: a per-test artifact such as stdout, stderr or a core dump.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub test_id: i32,
    #[sea_orm(primary_key, auto_increment = false, column_name = "type")]
    pub log_type: String,
    /// Size of the full log in bytes.
    pub size: i64,
    /// Locator of the full log in blob storage.
    pub storage: String,
    pub stack_trace: bool,
    pub patterns: Option<String>,
    /// Truncated log contents.
    pub log: Option<Vec<u8>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::test::Entity",
        from = "Column::TestId",
        to = "super::test::Column::TestId",
        on_delete = "Cascade"
    )]
    Test,
}

impl Related<super::test::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Test.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
