//! Subcommand implementations. Each module exposes a `run` function taking
//! already-parsed arguments and returning `Result<(), CliError>`.

pub mod bench;
pub mod generate;
