pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod output;
pub mod store;
