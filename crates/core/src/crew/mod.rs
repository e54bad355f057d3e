//! Crews: an ordered set of tasks and the agents that perform them.

pub mod builder;
pub mod error;
pub mod task;

pub use builder::{build_crew, interpolate};
pub use error::{ConfigurationError, CrewError, TaskError, TaskExecutionError};
pub use task::Task;

use crate::agents::agent::Agent;
use ck_protocol::crew_models::Process;
use std::sync::Arc;

/// A validated crew.
///
/// Construction checks that every task's agent belongs to the crew and that
/// every dependency is declared earlier than the task that consumes it. The
/// second rule also rules out cycles, so a crew that exists can always be
/// run in declaration order.
#[derive(Debug)]
pub struct Crew {
    name: String,
    agents: Vec<Arc<Agent>>,
    tasks: Vec<Arc<Task>>,
    /// Dependency indices per task, in the order the task declares them.
    dependencies: Vec<Vec<usize>>,
    process: Process,
}

impl Crew {
    pub fn new(
        name: impl Into<String>,
        agents: Vec<Arc<Agent>>,
        tasks: Vec<Arc<Task>>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if tasks.is_empty() {
            return Err(ConfigurationError::EmptyCrew { crew: name });
        }

        for (index, agent) in agents.iter().enumerate() {
            if agents[..index].iter().any(|other| other.role() == agent.role()) {
                return Err(ConfigurationError::DuplicateAgent {
                    role: agent.role().to_string(),
                });
            }
        }

        let mut dependencies = Vec::with_capacity(tasks.len());
        for (index, task) in tasks.iter().enumerate() {
            if tasks[..index]
                .iter()
                .any(|other| Arc::ptr_eq(other, task) || other.name() == task.name())
            {
                return Err(ConfigurationError::DuplicateTask {
                    name: task.name().to_string(),
                });
            }

            if !agents.iter().any(|agent| Arc::ptr_eq(agent, task.agent())) {
                return Err(ConfigurationError::UnknownAgent {
                    task: task.name().to_string(),
                    role: task.agent().role().to_string(),
                });
            }

            let mut indices = Vec::with_capacity(task.dependencies().len());
            for dependency in task.dependencies() {
                match tasks.iter().position(|other| Arc::ptr_eq(other, dependency)) {
                    Some(position) if position < index => indices.push(position),
                    Some(_) => {
                        return Err(ConfigurationError::ForwardReference {
                            task: task.name().to_string(),
                            dependency: dependency.name().to_string(),
                        })
                    }
                    None => {
                        return Err(ConfigurationError::UnknownDependency {
                            task: task.name().to_string(),
                            dependency: dependency.name().to_string(),
                        })
                    }
                }
            }
            dependencies.push(indices);
        }

        Ok(Self {
            name,
            agents,
            tasks,
            dependencies,
            process: Process::default(),
        })
    }

    /// Build a crew whose agents are the distinct agents referenced by
    /// `tasks`, in order of first use.
    pub fn from_tasks(
        name: impl Into<String>,
        tasks: Vec<Arc<Task>>,
    ) -> Result<Self, ConfigurationError> {
        let mut agents: Vec<Arc<Agent>> = Vec::new();
        for task in &tasks {
            if !agents.iter().any(|agent| Arc::ptr_eq(agent, task.agent())) {
                agents.push(Arc::clone(task.agent()));
            }
        }
        Self::new(name, agents, tasks)
    }

    pub fn with_process(mut self, process: Process) -> Self {
        self.process = process;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agents(&self) -> &[Arc<Agent>] {
        &self.agents
    }

    pub fn tasks(&self) -> &[Arc<Task>] {
        &self.tasks
    }

    pub fn process(&self) -> Process {
        self.process
    }

    /// Indices of the tasks `index` depends on. Every index is smaller than
    /// `index`.
    pub fn dependencies_of(&self, index: usize) -> &[usize] {
        self.dependencies
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn find_agent(&self, role: &str) -> Option<&Arc<Agent>> {
        self.agents.iter().find(|agent| agent.role() == role)
    }
}
