//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `devconf-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `PresetStore`: Preset registry
//!   - `ProjectConfigLoader`: Project override lookup
//!   - `AssetBundle`: Shell helpers copied next to the descriptor

pub mod output;

pub use output::{AssetBundle, AssetFile, Filesystem, PresetStore, ProjectConfigLoader};

#[cfg(test)]
pub use output::{MockAssetBundle, MockFilesystem, MockPresetStore, MockProjectConfigLoader};
