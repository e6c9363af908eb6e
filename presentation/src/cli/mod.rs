//! CLI argument parsing

pub mod commands;
