//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with a guaranteed timeout and kill.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncReadExt;

use crate::application::ports::{CommandRunner, Invocation, Logger, ProbeOutput};
use crate::domain::{CommandError, ExecEnv};

/// Raw result of one child process.
struct Finished {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

/// Production `CommandRunner` using tokio for async process execution.
///
/// The child sees exactly the `ExecEnv` passed to each call. Children are
/// killed explicitly on timeout but not when their future is dropped. A
/// child with captured output that outlives the program loses the read end
/// of its pipes, so its next write to stdout or stderr fails (EPIPE/SIGPIPE)
/// and it usually dies there; only children with inherited output keep
/// running undisturbed.
pub struct TokioCommandRunner {
    root: PathBuf,
    timeout: Duration,
    log: Arc<dyn Logger>,
}

impl TokioCommandRunner {
    /// `root` is the working directory of invocations without a `cwd` override.
    #[must_use]
    pub fn new(root: PathBuf, timeout: Duration, log: Arc<dyn Logger>) -> Self {
        Self { root, timeout, log }
    }

    async fn execute(&self, env: &ExecEnv, inv: &Invocation) -> Result<Finished, CommandError> {
        let command = inv.display();
        let (stdout, stderr) = if inv.capture {
            (Stdio::piped(), Stdio::piped())
        } else {
            (Stdio::inherit(), Stdio::inherit())
        };

        let mut child = tokio::process::Command::new(&inv.program)
            .args(&inv.args)
            .env_clear()
            .envs(env.iter())
            .current_dir(inv.cwd.as_ref().unwrap_or(&self.root))
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                );
                status
                    .map(|status| Finished {
                        status,
                        stdout: String::from_utf8_lossy(&stdout).trim().to_string(),
                        stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
                    })
                    .map_err(|source| CommandError::Spawn {
                        command: command.clone(),
                        source,
                    })
            } => result,
            () = tokio::time::sleep(self.timeout) => {
                let _ = child.kill().await;
                Err(CommandError::TimedOut {
                    command: command.clone(),
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }

    fn report_failure(&self, inv: &Invocation, err: &CommandError) {
        self.log.error(&format!("Command failed: {}", err.command()));
        match err {
            CommandError::Failed { stderr, .. } if inv.capture && !stderr.is_empty() => {
                self.log.error(stderr);
            }
            CommandError::Failed { .. } => {}
            other => self.log.debug(&other.to_string()),
        }
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, env: &ExecEnv, inv: &Invocation) -> Result<String, CommandError> {
        self.log.debug(&format!("Exec: {}", inv.display()));

        let result = match self.execute(env, inv).await {
            Ok(done) if done.status.success() => Ok(if inv.capture {
                done.stdout
            } else {
                String::new()
            }),
            Ok(done) => Err(CommandError::Failed {
                command: inv.display(),
                status: done.status.to_string(),
                stderr: done.stderr,
            }),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            self.report_failure(inv, e);
        }
        result
    }

    async fn probe(&self, env: &ExecEnv, inv: &Invocation) -> Result<ProbeOutput, CommandError> {
        self.log.debug(&format!("Exec: {}", inv.display()));
        let done = self.execute(env, inv).await?;
        Ok(ProbeOutput {
            success: done.status.success(),
            stdout: done.stdout,
        })
    }
}
