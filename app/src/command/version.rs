use std::process::ExitCode;

/// Strategy for displaying version information.
#[derive(Debug, Clone, Copy)]
pub struct VersionStrategy;

impl super::CommandStrategy for VersionStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<ExitCode> {
        println!("petstat {}", env!("CARGO_PKG_VERSION"));
        Ok(ExitCode::SUCCESS)
    }
}
