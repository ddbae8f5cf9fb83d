//! Listing sources.

mod json_file;
mod memory;

pub use json_file::JsonFileSource;
pub use memory::MemorySource;
