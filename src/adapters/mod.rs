//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestFrameSource`] - POST fetch transport using reqwest
//! - [`EventSourceFrameSource`] - GET transport using eventsource-client
//! - [`mock::MockFrameSource`] - Scripted frames for tests

pub mod event_source;
pub mod fetch;
pub mod mock;

pub use event_source::EventSourceFrameSource;
pub use fetch::ReqwestFrameSource;
pub use mock::{MockFrameSource, MockResponse};

use std::sync::Arc;

use crate::config::{ChatConfig, TransportKind};
use crate::traits::FrameSource;

/// Build the frame source selected by the configuration.
pub fn frame_source_for(config: &ChatConfig) -> Arc<dyn FrameSource> {
    match config.transport {
        TransportKind::Fetch => Arc::new(ReqwestFrameSource::new(config)),
        TransportKind::EventSource => Arc::new(EventSourceFrameSource::new(config)),
    }
}
