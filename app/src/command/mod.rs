//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type. Runs
//! are synchronous; every strategy reports the process exit status.

use std::process::ExitCode;

mod extract;
mod init;
mod version;

pub use extract::{ExtractInput, ExtractStrategy};
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Exit status for an empty extraction or when no input could be determined.
pub const EXIT_NO_RESULT: u8 = 2;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// `Ok` carries the exit status for conditions the operator should act
    /// on but that are not failures.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    fn execute(&self, input: Self::Input) -> anyhow::Result<ExitCode>;
}
