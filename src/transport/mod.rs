//! Transport layer for the CLI and HTTP surfaces

pub mod cli;
pub mod http;
