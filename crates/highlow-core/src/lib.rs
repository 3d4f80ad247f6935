pub mod config;
pub mod error;

pub use config::HighLowConfig;
pub use error::{HighLowError, Result};
