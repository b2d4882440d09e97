//! Infrastructure adapters for devconf.
//!
//! This crate implements the ports defined in `devconf-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod assets;
pub mod builtin_presets;
pub mod filesystem;
pub mod preset_loader;
pub mod preset_store;
pub mod project_loader;

// Re-export commonly used adapters
pub use assets::{DirectoryAssets, EmbeddedAssets};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use preset_loader::DirectoryPresetLoader;
pub use preset_store::InMemoryPresetStore;
pub use project_loader::JsonProjectLoader;
