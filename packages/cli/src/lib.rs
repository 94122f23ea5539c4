// ABOUTME: Library side of the berth CLI
// ABOUTME: Session wiring, logging setup, env-file rewriting and output formatting shared by the commands

pub mod env_file;
pub mod error;
pub mod logging;
pub mod output;
pub mod session;
pub mod window;

pub use error::{CliError, CliResult};
pub use session::Session;
