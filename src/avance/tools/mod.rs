pub mod config;
pub mod consolidate;
pub mod error;
pub mod filename;
pub mod frequency;
pub mod io;
pub mod logging;
pub mod model;
pub mod range;
pub mod request;
pub mod session;

pub use error::{Result, ToolError};
