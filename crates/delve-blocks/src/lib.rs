//! Block type table and registry crate.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{BlockRegistry, MAX_LIGHT};
pub use types::{AIR, BlockId, BlockType};
