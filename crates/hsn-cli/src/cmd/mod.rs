/// Command modules for the `hsn` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod import;
pub mod inspect;
pub mod search;
pub mod suggest;
pub mod validate;
