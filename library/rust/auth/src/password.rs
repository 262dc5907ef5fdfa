//! パスワードハッシュ (Argon2id)。

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashFailed(String),
}

/// Argon2id 推奨パラメータ: memory = 19456 KiB, iterations = 2, parallelism = 1
fn argon2_instance() -> Result<Argon2<'static>, PasswordError> {
    let params =
        Params::new(19456, 2, 1, None).map_err(|e| PasswordError::HashFailed(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// ソルト付きでパスワードをハッシュ化し、PHC 文字列を返す。
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2_instance()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// パスワードを検証する。
///
/// ハッシュ文字列の破損やアルゴリズム不一致も含め、検証できなかった場合は常に false を返す。
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    // パラメータはハッシュ文字列側の値が使われる
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
