//! Subprocess executor for command-backed runtimes.
//!
//! Spawns a command, optionally writes one line to its stdin, and parses its
//! stdout as JSON Lines / NDJSON.

use crate::agents::base::RuntimeError;
use std::pin::Pin;
use std::process::Stdio;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::process::Command;
use tokio_stream::Stream;

/// A stream of parsed JSON values, one per non-empty stdout line.
pub type JsonStream = Pin<Box<dyn Stream<Item = Result<serde_json::Value, RuntimeError>> + Send>>;

pub struct CliExecutor;

impl CliExecutor {
    /// Execute a command and parse its stdout as JSON Lines.
    ///
    /// When `stdin_line` is given it is written to the child's stdin followed
    /// by a newline, and stdin is closed. Empty lines are skipped; lines that
    /// fail to parse yield `RuntimeError::StreamParse`. The child's stderr is
    /// inherited.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ck_core::agents::cli_executor::CliExecutor;
    /// use tokio_stream::StreamExt;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let stream = CliExecutor::execute(
    ///         "echo".to_string(),
    ///         vec![r#"{"type":"final","output":"hi"}"#.to_string()],
    ///         ".".to_string(),
    ///         None,
    ///     );
    ///
    ///     let values: Vec<_> = stream.collect().await;
    ///     println!("Got {} values", values.len());
    /// }
    /// ```
    pub fn execute(
        command: String,
        args: Vec<String>,
        working_dir: String,
        stdin_line: Option<String>,
    ) -> JsonStream {
        let stream = async_stream::stream! {
            let mut cmd = Command::new(&command);
            cmd.args(&args);
            cmd.current_dir(&working_dir);
            cmd.stdin(if stdin_line.is_some() { Stdio::piped() } else { Stdio::null() });
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::inherit());
            cmd.kill_on_drop(true);

            let mut child = match cmd.spawn() {
                Ok(child) => child,
                Err(e) => {
                    yield Err(RuntimeError::Execution(format!(
                        "Failed to spawn command '{command}': {e}"
                    )));
                    return;
                }
            };

            if let Some(line) = stdin_line {
                let Some(mut stdin) = child.stdin.take() else {
                    yield Err(RuntimeError::Execution("Failed to capture stdin".to_string()));
                    return;
                };
                let written = async {
                    stdin.write_all(line.as_bytes()).await?;
                    stdin.write_all(b"\n").await?;
                    stdin.flush().await
                }
                .await;
                if let Err(e) = written {
                    yield Err(RuntimeError::Execution(format!("Failed to write to stdin: {e}")));
                    return;
                }
                // Close stdin to signal end of input
                drop(stdin);
            }

            let Some(stdout) = child.stdout.take() else {
                yield Err(RuntimeError::Execution("Failed to capture stdout".to_string()));
                return;
            };

            let mut lines = BufReader::new(stdout).lines();

            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }

                match serde_json::from_str::<serde_json::Value>(&line) {
                    Ok(value) => yield Ok(value),
                    Err(e) => {
                        yield Err(RuntimeError::StreamParse(format!(
                            "Failed to parse JSON: {e} (line: {line})"
                        )));
                    }
                }
            }

            // Output errors were surfaced above; a missing final step is
            // reported by the consumer.
            let _ = child.wait().await;
        };

        Box::pin(stream)
    }
}
