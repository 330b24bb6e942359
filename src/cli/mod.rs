//! Command-line front end.
//!
//! - [`args`] - Argument parsing
//! - [`input`] - Interactive command parsing
//! - [`render`] - Plain-text transcript renderer
//! - [`version`] - Version display

pub mod args;
pub mod input;
pub mod render;
pub mod version;

pub use args::{parse_args, usage, CliCommand, CliOptions};
pub use input::{parse_input, ChatInput};
pub use render::{format_table, PlainRenderer};
pub use version::{version_line, VERSION};
