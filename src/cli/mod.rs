//! Command-line driver

pub mod commands;
