//! Scripted runtime for tests and dry runs.

use crate::agents::base::{ReasoningRuntime, RuntimeError, StepStream, TaskRequest};
use async_trait::async_trait;
use ck_protocol::step_models::RawStep;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

type Script = Vec<Result<RawStep, RuntimeError>>;

/// Replays a fixed script of steps per task name.
///
/// Tasks without a script get a short default: one bare step followed by a
/// final answer naming the task. Every request is recorded so callers can
/// inspect the context a task received.
#[derive(Clone)]
pub struct ScriptedRuntime {
    available: bool,
    scripts: HashMap<String, Script>,
    requests: Arc<Mutex<Vec<TaskRequest>>>,
}

impl Default for ScriptedRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRuntime {
    pub fn new() -> Self {
        Self {
            available: true,
            scripts: HashMap::new(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Script the steps reported for `task_name`.
    pub fn with_steps(self, task_name: &str, steps: Vec<RawStep>) -> Self {
        self.with_script(task_name, steps.into_iter().map(Ok).collect())
    }

    /// Script `task_name` to answer `output` right away.
    pub fn with_answer(self, task_name: &str, output: &str) -> Self {
        self.with_steps(task_name, vec![RawStep::final_answer(output)])
    }

    /// Script `task_name` to report one step and then fail.
    pub fn failing(self, task_name: &str, message: &str) -> Self {
        self.with_script(
            task_name,
            vec![
                Ok(RawStep::bare("Starting...")),
                Err(RuntimeError::Execution(message.to_string())),
            ],
        )
    }

    pub fn with_script(mut self, task_name: &str, script: Script) -> Self {
        self.scripts.insert(task_name.to_string(), script);
        self
    }

    /// Requests received so far, in invocation order.
    pub fn requests(&self) -> Vec<TaskRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The context passed to the most recent invocation of `task_name`.
    pub fn context_for(&self, task_name: &str) -> Option<Vec<String>> {
        self.requests()
            .into_iter()
            .rev()
            .find(|request| request.task_name == task_name)
            .map(|request| request.context)
    }

    fn default_script(request: &TaskRequest) -> Script {
        vec![
            Ok(RawStep::bare(format!(
                "Working on `{}` as {}",
                request.task_name, request.agent.role
            ))),
            Ok(RawStep::final_answer(format!(
                "[dry-run] {} completed with {} context item(s)",
                request.task_name,
                request.context.len()
            ))),
        ]
    }
}

#[async_trait]
impl ReasoningRuntime for ScriptedRuntime {
    async fn check_availability(&self) -> bool {
        self.available
    }

    async fn execute(&self, request: &TaskRequest) -> Result<StepStream, RuntimeError> {
        if !self.available {
            return Err(RuntimeError::NotAvailable(
                "Scripted runtime not available".to_string(),
            ));
        }

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let script = self
            .scripts
            .get(&request.task_name)
            .cloned()
            .unwrap_or_else(|| Self::default_script(request));
        Ok(Box::pin(tokio_stream::iter(script)))
    }
}
