pub mod entities;
pub mod user_repo;
