//! Application layer for devconf.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, PresetService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! merge logic itself. All merge rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    DESCRIPTOR_FILE, DescriptorService, GenerateOutcome, GenerateRequest, GenerateService,
    PresetService,
};

pub use ports::{AssetBundle, AssetFile, Filesystem, PresetStore, ProjectConfigLoader};

pub use error::ApplicationError;
