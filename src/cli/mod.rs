//! Command-line interface.

pub mod args;
pub mod prompt;

pub use args::{Args, PlatformArg};
pub use prompt::{prompt_missing, prompt_missing_with};
