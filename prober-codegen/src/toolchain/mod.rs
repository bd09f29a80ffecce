//! Locating and running external tools.
//!
//! Every invocation blocks until the child exits. When a timeout is
//! configured the child is polled and killed once the deadline passes.

mod command;
mod protoc;

use std::{
    path::PathBuf,
    process::{Child, Command, ExitStatus},
    thread,
    time::{Duration, Instant},
};

pub use command::ToolCommand;
use prober_config::{Config, ToolsConfig};
use prober_core::{Error, Result};
pub use protoc::Protoc;
use tracing::{debug, trace};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// External tools available to a run.
#[derive(Debug, Clone)]
pub struct Toolchain {
    config: Config,
    timeout: Option<Duration>,
}

impl Toolchain {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            timeout: config.tools.timeout(),
        }
    }

    /// Override the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn tools(&self) -> &ToolsConfig {
        &self.config.tools
    }

    /// Resolve a configured program to an executable path.
    pub fn locate(&self, program: &str) -> Result<PathBuf> {
        which::which(self.config.resolve_program(program)).map_err(|_| Error::missing_tool(program))
    }

    /// Check that every program resolves, failing on the first one that doesn't.
    pub fn require<'a>(&self, programs: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for program in programs {
            let path = self.locate(program)?;
            trace!(program, path = %path.display(), "found tool");
        }
        Ok(())
    }

    /// Which of `programs` do not resolve.
    pub fn missing<'a>(&self, programs: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        programs
            .into_iter()
            .filter(|program| self.locate(program).is_err())
            .collect()
    }

    /// Start a `protoc` invocation using the configured schema compiler.
    pub fn protoc(&self) -> Protoc {
        Protoc::new(self.config.tools.protoc.clone())
    }

    /// Start a build tool invocation in the repository root.
    pub fn build_tool(&self) -> ToolCommand {
        ToolCommand::new(self.config.tools.build_tool.clone(), self.config.root())
    }

    /// Run a command to completion; a non-zero exit is an error.
    pub fn run(&self, command: &ToolCommand) -> Result<()> {
        let program = self.locate(command.program())?;
        debug!(command = %command, cwd = %command.cwd().display(), "running");

        let mut child = Command::new(&program)
            .args(command.get_args())
            .current_dir(command.cwd())
            .spawn()
            .map_err(|e| {
                Box::new(Error::ToolSpawn {
                    tool: command.program().to_string(),
                    source: e,
                })
            })?;

        let status = match self.timeout {
            Some(timeout) => wait_with_timeout(&mut child, timeout, command.program())?,
            None => child.wait().map_err(|e| {
                Box::new(Error::ToolSpawn {
                    tool: command.program().to_string(),
                    source: e,
                })
            })?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(Box::new(Error::ToolInvocation {
                tool: command.program().to_string(),
                code: status.code(),
                command: command.to_string(),
            }))
        }
    }
}

fn wait_with_timeout(child: &mut Child, timeout: Duration, tool: &str) -> Result<ExitStatus> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Box::new(Error::ToolTimeout {
                        tool: tool.to_string(),
                        seconds: timeout.as_secs(),
                    }));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(Box::new(Error::ToolSpawn {
                    tool: tool.to_string(),
                    source: e,
                }));
            }
        }
    }
}
