//! Ping command adapter (secondary/driven adapter)
//!
//! Implements [`IReachabilityCheck`] by running an external program, `ping
//! -c 1 <address>` by default, and returning its exit code. Output is
//! discarded.

use std::process::Stdio;

use hatsync_core::config::HealthConfig;
use hatsync_core::ports::IReachabilityCheck;
use tokio::process::Command;
use tracing::debug;

use crate::HealthError;

/// Exit code reported when the program was killed by a signal
pub const SIGNALLED_CODE: i32 = -1;

/// Runs one external reachability check per call
#[derive(Debug, Clone)]
pub struct PingCommand {
    program: String,
    args: Vec<String>,
}

impl PingCommand {
    /// # Arguments
    /// * `program` - Executable to run
    /// * `args` - Arguments placed before the address
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Result<Self, HealthError> {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(HealthError::EmptyCommand);
        }
        Ok(Self { program, args })
    }

    pub fn from_config(config: &HealthConfig) -> Result<Self, HealthError> {
        Self::new(config.ping_command.clone(), config.ping_args.clone())
    }

    /// Runs the program once against `address` and returns its exit code
    pub async fn run(&self, address: &str) -> Result<i32, HealthError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(address)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| HealthError::CommandFailed {
                command: self.program.clone(),
                source,
            })?;

        let code = status.code().unwrap_or(SIGNALLED_CODE);
        debug!(program = %self.program, address, code, "Reachability check finished");
        Ok(code)
    }
}

#[async_trait::async_trait]
impl IReachabilityCheck for PingCommand {
    async fn check(&self, address: &str) -> anyhow::Result<i32> {
        Ok(self.run(address).await?)
    }
}
