//! Runtime backed by an external command speaking JSON Lines.
//!
//! The command receives one JSON object on stdin: the task request fields
//! plus a rendered `prompt`. It answers with one [`RawStep`] per stdout line,
//! for example:
//!
//! ```text
//! {"type":"intermediate","action":"tool='web search' tool_input='boosting' ","observation":"[]"}
//! {"type":"final","output":"Use gradient boosting."}
//! ```

use crate::agents::base::{ReasoningRuntime, RuntimeError, StepStream, TaskRequest};
use crate::agents::cli_executor::CliExecutor;
use async_trait::async_trait;
use ck_protocol::config_models::RuntimeConfig;
use ck_protocol::step_models::RawStep;
use serde::Serialize;
use tokio_stream::StreamExt;

#[derive(Serialize)]
struct CommandPayload<'a> {
    #[serde(flatten)]
    request: &'a TaskRequest,
    prompt: String,
}

pub struct CommandRuntime {
    command: String,
    args: Vec<String>,
    working_dir: String,
}

impl CommandRuntime {
    pub fn new(command: impl Into<String>, args: Vec<String>, working_dir: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args,
            working_dir: working_dir.into(),
        }
    }

    pub fn from_config(config: &RuntimeConfig, working_dir: impl Into<String>) -> Self {
        Self::new(config.command.clone(), config.args.clone(), working_dir)
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

fn parse_step(value: serde_json::Value) -> Result<RawStep, RuntimeError> {
    serde_json::from_value(value)
        .map_err(|e| RuntimeError::StreamParse(format!("Unrecognized step: {e}")))
}

#[async_trait]
impl ReasoningRuntime for CommandRuntime {
    async fn check_availability(&self) -> bool {
        which::which(&self.command).is_ok()
    }

    async fn execute(&self, request: &TaskRequest) -> Result<StepStream, RuntimeError> {
        let payload = CommandPayload {
            request,
            prompt: request.prompt(),
        };
        let line = serde_json::to_string(&payload)
            .map_err(|e| RuntimeError::Execution(format!("Failed to encode request: {e}")))?;

        tracing::debug!(
            command = %self.command,
            task = %request.task_name,
            "Spawning runtime command"
        );

        let values = CliExecutor::execute(
            self.command.clone(),
            self.args.clone(),
            self.working_dir.clone(),
            Some(line),
        );

        Ok(Box::pin(values.map(|value| value.and_then(parse_step))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::base::AgentProfile;

    fn request() -> TaskRequest {
        TaskRequest {
            agent: AgentProfile {
                role: "Researcher".to_string(),
                goal: "Find papers".to_string(),
                backstory: String::new(),
                tools: vec![],
                allow_delegation: false,
            },
            task_name: "research".to_string(),
            description: "Research boosting".to_string(),
            expected_output: "Findings".to_string(),
            context: vec!["classification problem".to_string()],
        }
    }

    #[test]
    fn test_parse_step() {
        let value = serde_json::json!({"type": "final", "output": "done"});
        assert_eq!(parse_step(value), Ok(RawStep::final_answer("done")));

        let value = serde_json::json!({"type": "unknown"});
        assert!(matches!(parse_step(value), Err(RuntimeError::StreamParse(_))));
    }

    #[test]
    fn test_payload_flattens_request() {
        let request = request();
        let payload = CommandPayload {
            request: &request,
            prompt: request.prompt(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["task_name"], "research");
        assert_eq!(json["agent"]["role"], "Researcher");
        assert_eq!(json["context"][0], "classification problem");
        assert!(json["prompt"].as_str().unwrap().starts_with("Research boosting"));
    }

    #[tokio::test]
    async fn test_check_availability_missing_command() {
        let runtime = CommandRuntime::new("nonexistent-runtime-xyz", vec![], ".");
        assert!(!runtime.check_availability().await);
    }

    #[tokio::test]
    async fn test_execute_reads_steps_from_stdout() {
        // `cat` echoes the request back, which is not a step
        let runtime = CommandRuntime::new("cat", vec![], ".");
        let steps: Vec<_> = runtime.execute(&request()).await.unwrap().collect().await;

        assert_eq!(steps.len(), 1);
        assert!(matches!(steps[0], Err(RuntimeError::StreamParse(_))));

        let runtime = CommandRuntime::new(
            "echo",
            vec![r#"{"type":"final","output":"Use gradient boosting."}"#.to_string()],
            ".",
        );
        let steps: Vec<_> = runtime.execute(&request()).await.unwrap().collect().await;
        assert_eq!(steps, vec![Ok(RawStep::final_answer("Use gradient boosting."))]);
    }
}
