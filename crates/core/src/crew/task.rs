//! A unit of work bound to one agent.

use crate::agents::agent::Agent;
use crate::agents::base::{ReasoningRuntime, RuntimeError, TaskRequest};
use crate::crew::error::TaskError;
use crate::engine::emitter::StepEmitter;
use ck_protocol::run_models::TaskOutput;
use ck_protocol::step_models::RawStep;
use std::sync::{Arc, OnceLock};
use tokio_stream::StreamExt;

/// One task in a crew.
///
/// Dependencies are other tasks held by `Arc`, so a task can only depend on
/// tasks that already exist. The output slot is filled once, by
/// [`Task::execute`], and never changes afterwards.
#[derive(Debug)]
pub struct Task {
    name: String,
    description: String,
    expected_output: String,
    agent: Arc<Agent>,
    dependencies: Vec<Arc<Task>>,
    output: OnceLock<TaskOutput>,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        agent: Arc<Agent>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
            dependencies: Vec::new(),
            output: OnceLock::new(),
        }
    }

    /// Append `task` to the ordered list of dependencies.
    pub fn depends_on(mut self, task: &Arc<Task>) -> Self {
        self.dependencies.push(Arc::clone(task));
        self
    }

    pub fn with_dependencies(mut self, tasks: Vec<Arc<Task>>) -> Self {
        self.dependencies.extend(tasks);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    pub fn agent(&self) -> &Arc<Agent> {
        &self.agent
    }

    pub fn dependencies(&self) -> &[Arc<Task>] {
        &self.dependencies
    }

    pub fn output(&self) -> Option<&TaskOutput> {
        self.output.get()
    }

    pub fn is_complete(&self) -> bool {
        self.output.get().is_some()
    }

    /// Results of the dependencies, in declaration order.
    ///
    /// Fails with `DependencyPending` naming the first dependency that has
    /// not completed yet.
    pub fn resolve_context(&self) -> Result<Vec<String>, TaskError> {
        self.dependencies
            .iter()
            .map(|dependency| {
                dependency
                    .output()
                    .map(|output| output.raw.clone())
                    .ok_or_else(|| TaskError::DependencyPending {
                        task: self.name.clone(),
                        dependency: dependency.name.clone(),
                    })
            })
            .collect()
    }

    pub fn request(&self, context: &[String]) -> TaskRequest {
        TaskRequest {
            agent: self.agent.profile(),
            task_name: self.name.clone(),
            description: self.description.clone(),
            expected_output: self.expected_output.clone(),
            context: context.to_vec(),
        }
    }

    /// Run the task on `runtime` with the given context.
    ///
    /// Every reported step, the final one included, is routed through the
    /// agent and its display events are forwarded to `emitter` in order.
    /// Steps after the final answer are ignored. On success the output is
    /// stored and returned; a task runs at most once.
    pub async fn execute(
        &self,
        context: &[String],
        runtime: &dyn ReasoningRuntime,
        emitter: &mut StepEmitter,
    ) -> Result<TaskOutput, TaskError> {
        if self.is_complete() {
            return Err(TaskError::AlreadyExecuted {
                task: self.name.clone(),
            });
        }

        let request = self.request(context);
        let mut steps = runtime.execute(&request).await?;

        let raw = loop {
            let step = steps
                .next()
                .await
                .ok_or(RuntimeError::MissingFinalAnswer)??;
            for event in self.agent.on_step(&step) {
                emitter.emit(event).await;
            }
            if let RawStep::Final { output } = step {
                break output;
            }
        };

        let output = TaskOutput {
            task_name: self.name.clone(),
            agent_role: self.agent.role().to_string(),
            description: self.description.clone(),
            raw,
        };
        self.output
            .set(output.clone())
            .map_err(|_| TaskError::AlreadyExecuted {
                task: self.name.clone(),
            })?;

        Ok(output)
    }
}
