pub mod get_user;
pub mod login;
pub mod register_user;
pub mod update_user;

pub use get_user::{GetUserError, GetUserUseCase};
pub use login::{LoginError, LoginInput, LoginOutput, LoginUseCase};
pub use register_user::{RegisterUserError, RegisterUserInput, RegisterUserUseCase};
pub use update_user::{UpdateUserError, UpdateUserUseCase};

/// パスワードハッシュ計算をブロッキングスレッドプールで実行する。
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, String>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| format!("blocking task failed: {}", e))
}
