//! Auth codes identifying GitHub logins to the API.

use rand::Rng;
use tracing::{info, warn};

use crate::db::{DbPool, users as db};
use crate::error::{AppError, AppResult};

/// Characters an auth code is drawn from.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Length of an auth code.
const CODE_LENGTH: usize = 20;

/// Generate a new random auth code.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
        .collect()
}

/// Auth code of `login`, issuing and storing a new one on first use.
pub async fn get_auth_code(pool: &DbPool, login: &str) -> AppResult<String> {
    let login = login.trim();
    if login.is_empty() {
        return Err(AppError::InvalidInput("login must not be empty".to_string()));
    }

    if let Some(user) = db::find_by_name(pool.connection(), login).await? {
        return Ok(user.code);
    }

    let code = generate_code();
    if let Err(e) = db::insert(pool.connection(), login, &code).await {
        // a concurrent request may have issued a code in the meantime
        warn!("Failed to store auth code for {}: {}", login, e);
        return db::find_by_name(pool.connection(), login)
            .await?
            .map(|user| user.code)
            .ok_or(e);
    }

    info!("Issued auth code for {}", login);
    Ok(code)
}

/// GitHub login an auth code was issued to.
pub async fn get_github_login(pool: &DbPool, code: &str) -> AppResult<Option<String>> {
    Ok(db::find_by_code(pool.connection(), code)
        .await?
        .map(|user| user.name))
}
