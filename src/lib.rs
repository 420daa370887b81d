pub mod cli;
pub mod command;
pub mod error;
pub mod files;
pub mod forge;
pub mod notes;
pub mod opts;

pub use error::{RelnotesError, Result};
