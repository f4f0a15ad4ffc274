pub mod config;
pub mod error;
pub mod types;

pub use config::GameOptions;
pub use error::{Result, TriviaError};
