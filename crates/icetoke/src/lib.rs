pub mod args;
pub mod commands;
pub mod compare;
pub mod config;
pub mod corpus;
pub mod cost;
pub mod error;
pub mod estimate;
pub mod output;
pub mod prelude;
pub mod progress;
pub mod stats;
pub mod summary;

pub use crate::error::Error;
pub use crate::prelude::Result;
