//! Core domain layer for devconf.
//!
//! Pure logic only: the descriptor model, the layered merge, validation and
//! JSON rendering. Reading presets, loading project overrides and writing
//! files happen behind the ports in `crate::application`.

pub mod assembler;
pub mod config;
pub mod error;
pub mod merge;
pub mod preset;
pub mod serialize;
pub mod validation;

pub use assembler::generate_preset_config;
pub use config::{
    ConfigCheck, Customizations, DevContainerConfig, EnvMap, ForwardPort, JsonObject,
    LifecycleCommand, Mount, MountRecord, PATH_KEY, SCHEMA_URL, VsCodeCustomizations,
    check_config,
};
pub use error::{DomainError, ErrorCategory};
pub use preset::{Preset, PresetFile, to_pascal_case, validate_preset_name};
pub use serialize::{from_descriptor_json, to_descriptor_json};
pub use validation::{RECOGNISED_KEYS, ValidationReport, validate};
