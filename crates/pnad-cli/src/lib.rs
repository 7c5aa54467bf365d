//! CLI library components for the PNAD pipeline.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
