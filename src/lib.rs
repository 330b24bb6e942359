//! Orbital - streaming chat client for the Orbital data analysis agent
//!
//! Decodes the agent's SSE stream into typed events, coalesces streamed text
//! into chat messages, and manages the session and stream lifecycle. This
//! library exposes modules for use by the binary and integration tests.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod sse;
pub mod stream;
pub mod traits;
