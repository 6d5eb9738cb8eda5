//! Subprocess execution on the host.

use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::{Duration, timeout};
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("empty command")]
    EmptyCommand,

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} timed out after {seconds}s")]
    TimedOut { program: String, seconds: u64 },

    #[error("{program} exited with code {exit_code}: {stderr}")]
    Failed {
        program: String,
        exit_code: i32,
        stderr: String,
    },
}

/// Captured output of a successful command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A command line plus how to run it.
#[derive(Debug, Clone, Default)]
pub struct ProcessSpec<'a> {
    /// Program followed by its arguments.
    pub argv: Vec<String>,
    pub cwd: Option<&'a Path>,
    pub stdin: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Run a command to completion, failing on a non-zero exit.
///
/// The child is killed if the timeout expires.
pub async fn run(spec: ProcessSpec<'_>) -> Result<CommandOutput, ProcessError> {
    let (program, args) = spec.argv.split_first().ok_or(ProcessError::EmptyCommand)?;

    debug!(program = %program, ?args, cwd = ?spec.cwd, "Spawning process");

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(if spec.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(cwd) = spec.cwd {
        command.current_dir(cwd);
    }

    let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
        program: program.clone(),
        source,
    })?;

    // Feed stdin from a separate task so a chatty child cannot block on a
    // full stdout pipe while we are still writing.
    let writer = match (child.stdin.take(), spec.stdin) {
        (Some(mut stdin), Some(input)) => Some(tokio::spawn(async move {
            let result = stdin.write_all(input.as_bytes()).await;
            drop(stdin);
            result
        })),
        _ => None,
    };

    let output = match spec.timeout_seconds {
        Some(seconds) => match timeout(Duration::from_secs(seconds), child.wait_with_output()).await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(program = %program, seconds, "Process timed out, killing");
                return Err(ProcessError::TimedOut {
                    program: program.clone(),
                    seconds,
                });
            }
        },
        None => child.wait_with_output().await,
    }
    .map_err(|source| ProcessError::Wait {
        program: program.clone(),
        source,
    })?;

    if let Some(writer) = writer {
        match writer.await {
            Ok(Err(e)) => debug!(error = %e, "Child closed stdin early"),
            Err(e) => debug!(error = %e, "Stdin writer task failed"),
            Ok(Ok(())) => {}
        }
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(ProcessError::Failed {
            program: program.clone(),
            exit_code: output.status.code().unwrap_or(-1),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(CommandOutput { stdout, stderr })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_captures_stdout() {
        let output = run(ProcessSpec {
            argv: sh("echo hello"),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_feeds_stdin() {
        let output = run(ProcessSpec {
            argv: sh("sort"),
            stdin: Some("b\na\n".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(output.stdout, "a\nb\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_keeps_stderr() {
        let err = run(ProcessSpec {
            argv: sh("echo boom >&2; exit 3"),
            ..Default::default()
        })
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Failed { exit_code: 3, ref stderr, .. } if stderr == "boom"
        ));
    }

    #[tokio::test]
    async fn test_timeout() {
        let err = run(ProcessSpec {
            argv: sh("sleep 5"),
            timeout_seconds: Some(1),
            ..Default::default()
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ProcessError::TimedOut { seconds: 1, .. }));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let err = run(ProcessSpec {
            argv: vec!["cimatrix-definitely-not-installed".to_string()],
            ..Default::default()
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));

        let err = run(ProcessSpec::default()).await.unwrap_err();
        assert!(matches!(err, ProcessError::EmptyCommand));
    }
}
