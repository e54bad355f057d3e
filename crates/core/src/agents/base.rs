//! Reasoning runtime trait and supporting types.

use async_trait::async_trait;
use ck_protocol::step_models::RawStep;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::Stream;

/// Separator placed between dependency results in a rendered prompt.
pub const CONTEXT_SEPARATOR: &str = "\n\n----------\n\n";

/// What a runtime needs to know about the agent working on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<String>,
    pub allow_delegation: bool,
}

/// One task invocation handed to a reasoning runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub agent: AgentProfile,
    pub task_name: String,
    pub description: String,
    pub expected_output: String,

    /// Results of the task's dependencies, in declaration order.
    pub context: Vec<String>,
}

impl TaskRequest {
    /// Render the task as a single prompt.
    ///
    /// The context block is omitted when the task has no dependencies.
    pub fn prompt(&self) -> String {
        let mut prompt = format!(
            "{}\n\nThis is the expected criteria for your final answer: {}\nYou MUST return the actual complete content as the final answer, not a summary.",
            self.description, self.expected_output
        );
        if !self.context.is_empty() {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(&self.context.join(CONTEXT_SEPARATOR));
        }
        prompt
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Runtime not available: {0}")]
    NotAvailable(String),
    #[error("Execution failed: {0}")]
    Execution(String),
    #[error("Step stream parsing error: {0}")]
    StreamParse(String),
    #[error("Runtime finished without a final answer")]
    MissingFinalAnswer,
}

/// Steps reported by a runtime for one task invocation.
pub type StepStream = Pin<Box<dyn Stream<Item = Result<RawStep, RuntimeError>> + Send>>;

/// The external collaborator that actually reasons about a task.
///
/// Each invocation yields zero or more intermediate or bare steps followed by
/// exactly one [`RawStep::Final`]. Anything after the final step is ignored.
#[async_trait]
pub trait ReasoningRuntime: Send + Sync {
    async fn check_availability(&self) -> bool;
    async fn execute(&self, request: &TaskRequest) -> Result<StepStream, RuntimeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    struct EchoRuntime {
        available: bool,
    }

    #[async_trait]
    impl ReasoningRuntime for EchoRuntime {
        async fn check_availability(&self) -> bool {
            self.available
        }

        async fn execute(&self, request: &TaskRequest) -> Result<StepStream, RuntimeError> {
            if !self.available {
                return Err(RuntimeError::NotAvailable("Echo runtime not available".to_string()));
            }

            let prompt = request.prompt();
            let stream = tokio_stream::iter(vec![
                Ok(RawStep::bare(format!("Processing: {}", request.task_name))),
                Ok(RawStep::final_answer(prompt)),
            ]);

            Ok(Box::pin(stream))
        }
    }

    fn request(context: Vec<&str>) -> TaskRequest {
        TaskRequest {
            agent: AgentProfile {
                role: "Researcher".to_string(),
                goal: "Find papers".to_string(),
                backstory: String::new(),
                tools: vec![],
                allow_delegation: false,
            },
            task_name: "research".to_string(),
            description: "Gather documentation.".to_string(),
            expected_output: "A summary of findings.".to_string(),
            context: context.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_prompt_without_context() {
        let prompt = request(vec![]).prompt();
        assert!(prompt.starts_with("Gather documentation."));
        assert!(prompt.contains("expected criteria for your final answer: A summary of findings."));
        assert!(!prompt.contains("context you're working with"));
    }

    #[test]
    fn test_prompt_with_context_in_order() {
        let prompt = request(vec!["first result", "second result"]).prompt();
        assert!(prompt.ends_with("first result\n\n----------\n\nsecond result"));
    }

    #[tokio::test]
    async fn test_runtime_execute_success() {
        let runtime = EchoRuntime { available: true };
        assert!(runtime.check_availability().await);

        let steps: Vec<_> = runtime
            .execute(&request(vec!["ctx"]))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(steps.len(), 2);
        assert!(matches!(steps[0], Ok(RawStep::Bare { .. })));
        assert!(matches!(&steps[1], Ok(step) if step.is_final()));
    }

    #[tokio::test]
    async fn test_runtime_execute_unavailable() {
        let runtime = EchoRuntime { available: false };
        let result = runtime.execute(&request(vec![])).await;
        assert!(matches!(result, Err(RuntimeError::NotAvailable(_))));
    }
}
