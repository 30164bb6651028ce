//! Story manifests: the configuration layer over the kernel.
//!
//! A TOML manifest declares component signatures and stories; this crate
//! parses it, resolves custom-control producers by name, and builds kernel
//! [`StoryConfig`](storybook_kernel::StoryConfig)s.

pub mod controls;
pub mod error;
pub mod manifest;
pub mod producers;

pub use controls::{ControlSpec, CustomSpec, NumberSpec, OptionsSpec};
pub use error::ManifestError;
pub use manifest::{Manifest, StorySpec};
pub use producers::{ProducerOptions, ProducerRegistry};
