pub mod catalog;
pub mod config;
pub mod optimizer;
pub mod output;
pub mod server;
pub mod simulation;
