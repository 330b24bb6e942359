//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`FrameSource`] - Opens a streamed chat exchange and yields SSE frames

pub mod frame_source;

pub use frame_source::{FrameSource, FrameStream};
