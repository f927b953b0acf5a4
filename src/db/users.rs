//! Database operations for users and their auth codes.

use sea_orm::*;

use crate::entity::user;
use crate::error::AppResult;

/// Find a user by GitHub login.
pub async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> AppResult<Option<user::Model>> {
    let result = user::Entity::find()
        .filter(user::Column::Name.eq(name))
        .one(db)
        .await?;

    Ok(result)
}

/// Find the user an auth code was issued to.
pub async fn find_by_code<C: ConnectionTrait>(
    db: &C,
    code: &str,
) -> AppResult<Option<user::Model>> {
    let result = user::Entity::find()
        .filter(user::Column::Code.eq(code))
        .one(db)
        .await?;

    Ok(result)
}

/// Insert a user with its auth code.
pub async fn insert<C: ConnectionTrait>(db: &C, name: &str, code: &str) -> AppResult<()> {
    let model = user::ActiveModel {
        name: Set(name.to_string()),
        code: Set(code.to_string()),
        ..Default::default()
    };

    user::Entity::insert(model).exec(db).await?;
    Ok(())
}
