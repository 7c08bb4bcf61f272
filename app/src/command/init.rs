use petstat_config::Config;
use std::process::ExitCode;

/// Strategy for initializing the configuration.
///
/// Writes the default configuration to `~/petstat/config.json`, or to the path
/// given with `--config`. An existing file is never overwritten.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = Option<std::path::PathBuf>;

    fn execute(&self, input: Self::Input) -> anyhow::Result<ExitCode> {
        match input {
            Some(path) => {
                Config::create_config_at(&path)?;
                println!("✅ Created config file at: {}", path.display());
            }
            None => {
                Config::create_config()?;
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}
