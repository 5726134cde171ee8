pub mod commands;
pub mod config;
pub mod deps;
pub mod error;
pub mod eval;
pub mod logging;
pub mod model;
pub mod output;
pub mod queue;
pub mod registry;
pub mod store;
