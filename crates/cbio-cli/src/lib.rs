//! Library side of the `cbio-convert` binary.

pub mod config;
pub mod logging;
pub mod omics;
pub mod pipeline;
pub mod taxonomy;
pub mod types;
