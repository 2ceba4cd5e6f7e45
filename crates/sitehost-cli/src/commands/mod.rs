//! Command implementations for the sitehost CLI.
//!
//! sitehost has a single command, [`serve`]: build (optionally), serve, and
//! react to operator input until told to quit. It takes the parsed arguments
//! and returns a Result.

pub mod serve;

pub use serve::execute as serve_execute;
