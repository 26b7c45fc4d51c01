//! MealMingle library
//!
//! On-device recipe storage: a repository over a single persisted recipe
//! collection, the key-value stores it can sit on, and the service the
//! app's screens call.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod services;
pub mod storage;
