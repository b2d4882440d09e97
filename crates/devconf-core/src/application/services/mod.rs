//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a descriptor" or "scaffold a preset".

pub mod descriptor_service;
pub mod generate_service;
pub mod preset_service;

pub use descriptor_service::DescriptorService;
pub use generate_service::{DESCRIPTOR_FILE, GenerateOutcome, GenerateRequest, GenerateService};
pub use preset_service::PresetService;
