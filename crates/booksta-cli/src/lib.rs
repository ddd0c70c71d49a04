//! Library components of the `booksta` CLI.

pub mod logging;
pub mod render;
