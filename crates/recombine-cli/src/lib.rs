//! Library components of the `recombine` command-line tool.
//!
//! Document I/O, configuration discovery, terminal prompting and logging
//! setup. The binary in `main.rs` wires these to the core engine.

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod prompt;

pub use error::InputError;
