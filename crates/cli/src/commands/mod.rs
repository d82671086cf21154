//! CLI command implementations.

pub mod generate;
pub mod init;
pub mod list;
pub mod validate;
pub mod watch;
