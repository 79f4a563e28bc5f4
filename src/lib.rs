pub mod cli;
pub mod error;
pub mod logging;
pub mod process;

pub use error::{CookieError, Result};
