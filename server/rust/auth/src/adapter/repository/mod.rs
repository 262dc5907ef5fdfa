pub mod user_memory;
pub mod user_postgres;

pub use user_memory::InMemoryUserRepository;
pub use user_postgres::UserPostgresRepository;
