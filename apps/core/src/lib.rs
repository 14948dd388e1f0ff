// Soul Link Core
// "The Brain" - mood inference, wellness suggestions and metrics for journal entries

pub mod actors;
pub mod brain;
pub mod config;
pub mod database;
pub mod error;
pub mod fs_manager;
pub mod models;

#[cfg(test)]
mod tests;
