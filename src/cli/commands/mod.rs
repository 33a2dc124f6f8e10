//! Command implementations for the product importer CLI
//!
//! Each command is implemented in its own module:
//! - `import`: validate a file and create its valid products
//! - `validate`: validate a file without persisting anything

pub mod import;
pub mod shared;
pub mod validate;

use tokio_util::sync::CancellationToken;

use crate::Result;
use crate::cli::args::{Args, Commands};
use crate::{Error, constants::APP_DIR_NAME};

/// Main command runner
///
/// Dispatches to the subcommand handler. The cancellation token is only
/// honoured by `import`, between batches.
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<()> {
    match args.command {
        Some(Commands::Import(import_args)) => {
            import::run_import(import_args, cancellation_token).await
        }
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        None => Err(Error::configuration(format!(
            "No command given; run `{} --help` for usage",
            APP_DIR_NAME
        ))),
    }
}
