pub mod connection;
pub mod gateway;
pub mod migrations;
pub mod password;
pub mod task_repo;
pub mod user_repo;

pub use connection::*;
pub use gateway::SqliteGateway;
