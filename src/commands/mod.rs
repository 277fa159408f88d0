//! Commands Module
//!
//! CLI subcommand implementations.

pub mod init_config;
pub mod inspect;
