//! Devconf Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the devconf
//! devcontainer generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           devconf-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (GenerateService, PresetService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, PresetStore, Loader, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    devconf-adapters (Infrastructure)    │
//! │ (InMemoryPresetStore, LocalFilesystem)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (DevContainerConfig, merge, validation) │
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use devconf_core::domain::{DevContainerConfig, generate_preset_config, to_descriptor_json};
//!
//! let base = DevContainerConfig {
//!     image: Some("mcr.microsoft.com/devcontainers/base:ubuntu".into()),
//!     ..Default::default()
//! };
//!
//! let merged = generate_preset_config(&base, None, None);
//! let json = to_descriptor_json(&merged).unwrap();
//! assert!(json.ends_with("}\n"));
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateService, PresetService,
        ports::{AssetBundle, Filesystem, PresetStore, ProjectConfigLoader},
    };
    pub use crate::domain::{
        DevContainerConfig, LifecycleCommand, Mount, Preset, generate_preset_config,
        to_descriptor_json, validate,
    };
    pub use crate::error::{DevconfError, DevconfResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
