//! # Storybook Kernel
//!
//! Declares stories: named, validated bindings of control values to a
//! component constructor, rendered as Component Story Format parameters.
//!
//! The kernel is host-agnostic. It never introspects a component at runtime;
//! the host describes each constructor with a [`Signature`].
//!
//! ## Architecture
//!
//! ```text
//! Signature        ← Positional/keyword parameter descriptor + matcher
//!     │
//! Control          ← Value, allowed set, rendering kind
//!     │
//! CustomControl    ← Value produced by a Producer from nested controls
//!     │
//! StoryConfig      ← Bindings + parameters → ErrorNode tree or CsfStory
//! ```

pub mod control;
pub mod csf;
pub mod custom;
pub mod error;
pub mod signature;
pub mod story;

pub use control::{
    ColorControl, Control, ControlKind, NumberControl, OptionsControl, OptionsStyle,
    display_name,
};
pub use csf::CsfStory;
pub use custom::{CustomControl, Producer};
pub use error::{ErrorNode, Scope, SignatureError, ValidationError, Violation};
pub use signature::{KeywordParam, PositionalKind, PositionalParam, Signature};
pub use story::StoryConfig;
