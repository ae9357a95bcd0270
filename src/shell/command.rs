//! Shell command execution.

use crate::environment::EnvContext;
use crate::error::{KubeshellError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};

use super::platform::Platform;

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellResult {
    /// Exit code; `-1` if the child was killed by a signal.
    pub exit_code: i32,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,
}

impl ShellResult {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Exit code zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Exit code zero and nothing written to stderr.
    pub fn clean(&self) -> bool {
        self.success() && self.stderr.is_empty()
    }

    fn from_output(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// How the child process is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// Awaited on the async runtime.
    #[default]
    Async,
    /// Run with `std::process` on the runtime's blocking pool.
    Blocking,
}

/// Everything needed to spawn a command.
///
/// Built by [`ExecutionOptionsBuilder`](crate::environment::ExecutionOptionsBuilder)
/// and not modified afterwards.
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Complete child environment. Replaces, not merges with, the parent's.
    pub env: EnvContext,

    /// Execution mode flag.
    pub mode: ExecMode,

    /// Suppress the info-level log line for each command.
    pub silent: bool,

    /// Platform whose shell runs command strings.
    pub platform: Platform,
}

/// Output line from streaming execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Run a command through the platform shell.
pub async fn exec(command: &str, options: &ExecutionOptions) -> Result<ShellResult> {
    exec_with_stdin(command, None, options).await
}

/// Run a command through the platform shell, feeding `stdin` to it.
///
/// Resolves once the child exits and both output streams are drained.
/// A child that cannot be started yields [`KubeshellError::SpawnFailed`];
/// a child that runs and fails yields `Ok` with a non-zero exit code.
pub async fn exec_with_stdin(
    command: &str,
    stdin: Option<&str>,
    options: &ExecutionOptions,
) -> Result<ShellResult> {
    let (shell, flag) = shell_invocation(options.platform, &options.env);
    if !options.silent {
        tracing::info!("$ {}", command);
    }
    let cmd = build_command(Path::new(&shell), &[flag, command], options);
    run(cmd, command, stdin, options.mode).await
}

/// Run a command and report whether it exited with code zero.
///
/// Spawn failures count as failure.
pub async fn exec_check(command: &str, options: &ExecutionOptions) -> bool {
    exec(command, options)
        .await
        .map(|r| r.success())
        .unwrap_or(false)
}

/// Run a program directly, without a shell.
pub async fn run_program(
    program: &Path,
    args: &[&str],
    options: &ExecutionOptions,
) -> Result<ShellResult> {
    let shown = std::iter::once(program.display().to_string())
        .chain(args.iter().map(|a| a.to_string()))
        .collect::<Vec<_>>()
        .join(" ");
    if !options.silent {
        tracing::info!("$ {}", shown);
    }
    let cmd = build_command(program, args, options);
    run(cmd, &shown, None, options.mode).await
}

/// Run a command, passing each output line to `callback` as it arrives.
///
/// The returned result still carries the complete output.
pub async fn exec_streaming<F>(
    command: &str,
    options: &ExecutionOptions,
    callback: F,
) -> Result<ShellResult>
where
    F: Fn(OutputLine) + Send + Sync,
{
    let (shell, flag) = shell_invocation(options.platform, &options.env);
    if !options.silent {
        tracing::info!("$ {}", command);
    }
    let mut cmd = tokio::process::Command::from(build_command(
        Path::new(&shell),
        &[flag, command],
        options,
    ));
    cmd.stdin(Stdio::null());

    let mut child = cmd
        .spawn()
        .map_err(|e| KubeshellError::spawn_failed(command, &e))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let callback = &callback;

    let read_stdout = async move {
        match stdout {
            Some(pipe) => relay_lines(pipe, |line| callback(OutputLine::Stdout(line))).await,
            None => String::new(),
        }
    };

    let read_stderr = async move {
        match stderr {
            Some(pipe) => relay_lines(pipe, |line| callback(OutputLine::Stderr(line))).await,
            None => String::new(),
        }
    };

    let (stdout_output, stderr_output) = tokio::join!(read_stdout, read_stderr);

    let status = child
        .wait()
        .await
        .map_err(|e| KubeshellError::spawn_failed(command, &e))?;

    Ok(ShellResult::new(
        status.code().unwrap_or(-1),
        stdout_output,
        stderr_output,
    ))
}

/// Read `pipe` to the end, handing each line to `emit`.
///
/// Bytes that are not valid UTF-8 are replaced rather than ending the
/// stream, so the collected text matches what [`exec`] returns.
async fn relay_lines<R, F>(pipe: R, emit: F) -> String
where
    R: AsyncRead + Unpin,
    F: Fn(String),
{
    let mut reader = BufReader::new(pipe);
    let mut output = String::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                let line = String::from_utf8_lossy(&buf).into_owned();
                output.push_str(&line);
                output.push('\n');
                emit(line);
            }
            Err(e) => {
                tracing::debug!("Could not read output: {}", e);
                break;
            }
        }
    }
    output
}

/// Shell executable and the flag that makes it run one command string.
///
/// Reads `COMSPEC` on Windows and `SHELL` elsewhere from the child's
/// environment, falling back to `cmd.exe` and `/bin/sh`.
fn shell_invocation(platform: Platform, env: &EnvContext) -> (String, &'static str) {
    if platform.is_windows() {
        let shell = env
            .get("COMSPEC")
            .filter(|s| !s.is_empty())
            .unwrap_or("cmd.exe");
        (shell.to_string(), "/C")
    } else {
        let shell = env.get("SHELL").filter(|s| !s.is_empty()).unwrap_or("/bin/sh");
        (shell.to_string(), "-c")
    }
}

fn build_command(program: &Path, args: &[&str], options: &ExecutionOptions) -> std::process::Command {
    let mut cmd = std::process::Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    cmd.env_clear();
    cmd.envs(options.env.iter());

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd
}

async fn run(
    mut cmd: std::process::Command,
    shown: &str,
    stdin: Option<&str>,
    mode: ExecMode,
) -> Result<ShellResult> {
    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    match mode {
        ExecMode::Async => run_async(cmd, shown, stdin).await,
        ExecMode::Blocking => {
            let shown = shown.to_string();
            let input = stdin.map(str::to_string);
            tokio::task::spawn_blocking(move || run_blocking(cmd, &shown, input))
                .await
                .map_err(|e| anyhow::anyhow!("blocking execution task failed: {}", e))?
        }
    }
}

async fn run_async(
    cmd: std::process::Command,
    shown: &str,
    stdin: Option<&str>,
) -> Result<ShellResult> {
    let mut child = tokio::process::Command::from(cmd)
        .spawn()
        .map_err(|e| KubeshellError::spawn_failed(shown, &e))?;

    let pipe = child.stdin.take();
    let write_input = async move {
        if let (Some(mut pipe), Some(input)) = (pipe, stdin) {
            // A child that exits without reading its input closes the pipe.
            if let Err(e) = pipe.write_all(input.as_bytes()).await {
                tracing::debug!("Could not write stdin: {}", e);
            }
        }
    };

    let ((), output) = tokio::join!(write_input, child.wait_with_output());
    let output = output.map_err(|e| KubeshellError::spawn_failed(shown, &e))?;

    Ok(ShellResult::from_output(output))
}

fn run_blocking(
    mut cmd: std::process::Command,
    shown: &str,
    stdin: Option<String>,
) -> Result<ShellResult> {
    let mut child = cmd
        .spawn()
        .map_err(|e| KubeshellError::spawn_failed(shown, &e))?;

    let writer = match (child.stdin.take(), stdin) {
        (Some(mut pipe), Some(input)) => Some(std::thread::spawn(move || {
            if let Err(e) = pipe.write_all(input.as_bytes()) {
                tracing::debug!("Could not write stdin: {}", e);
            }
        })),
        _ => None,
    };

    let output = child
        .wait_with_output()
        .map_err(|e| KubeshellError::spawn_failed(shown, &e))?;

    if let Some(handle) = writer {
        let _ = handle.join();
    }

    Ok(ShellResult::from_output(output))
}
