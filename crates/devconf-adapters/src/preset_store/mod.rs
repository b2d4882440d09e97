//! Preset registry adapters.

mod memory;

pub use memory::InMemoryPresetStore;
