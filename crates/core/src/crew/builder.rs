//! Builds a runnable [`Crew`] from its YAML definition.

use crate::agents::agent::Agent;
use crate::crew::error::ConfigurationError;
use crate::crew::task::Task;
use crate::crew::Crew;
use ck_protocol::agent_models::AgentDefinition;
use ck_protocol::crew_models::{CrewDefinition, Process};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static PLACEHOLDER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").ok());

/// Replace `{key}` placeholders with values from `inputs`.
///
/// Placeholders without a matching input are left as they are, so literal
/// braces in descriptions (JSON samples, code) survive untouched.
pub fn interpolate(template: &str, inputs: &HashMap<String, String>) -> String {
    let Some(pattern) = PLACEHOLDER_PATTERN.as_ref() else {
        return template.to_string();
    };
    pattern
        .replace_all(template, |caps: &Captures| match inputs.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Build a crew from `definition`.
///
/// Agents are instantiated from `agent_definitions` for the roles the tasks
/// use, once per role. Descriptions and expected outputs are interpolated
/// with `inputs`. The crew's own `process` wins over `default_process`.
pub fn build_crew(
    definition: &CrewDefinition,
    agent_definitions: &[AgentDefinition],
    inputs: &HashMap<String, String>,
    default_process: Process,
) -> Result<Crew, ConfigurationError> {
    let mut agents: Vec<Arc<Agent>> = Vec::new();
    let mut tasks: Vec<Arc<Task>> = Vec::with_capacity(definition.tasks.len());

    for (index, task_definition) in definition.tasks.iter().enumerate() {
        if tasks.iter().any(|task| task.name() == task_definition.name) {
            return Err(ConfigurationError::DuplicateTask {
                name: task_definition.name.clone(),
            });
        }

        let agent = match agents
            .iter()
            .find(|agent| agent.role() == task_definition.agent)
        {
            Some(agent) => Arc::clone(agent),
            None => {
                let agent_definition = agent_definitions
                    .iter()
                    .find(|agent| agent.role == task_definition.agent)
                    .ok_or_else(|| ConfigurationError::UnknownAgent {
                        task: task_definition.name.clone(),
                        role: task_definition.agent.clone(),
                    })?;
                let agent = Arc::new(Agent::from_definition(agent_definition));
                agents.push(Arc::clone(&agent));
                agent
            }
        };

        let mut task = Task::new(
            task_definition.name.clone(),
            interpolate(&task_definition.description, inputs),
            agent,
            interpolate(&task_definition.expected_output, inputs),
        );

        for dependency in &task_definition.context {
            match tasks.iter().find(|task| task.name() == dependency) {
                Some(upstream) => task = task.depends_on(upstream),
                None if definition.tasks[index..]
                    .iter()
                    .any(|later| &later.name == dependency) =>
                {
                    return Err(ConfigurationError::ForwardReference {
                        task: task_definition.name.clone(),
                        dependency: dependency.clone(),
                    })
                }
                None => {
                    return Err(ConfigurationError::UnknownDependency {
                        task: task_definition.name.clone(),
                        dependency: dependency.clone(),
                    })
                }
            }
        }

        tasks.push(Arc::new(task));
    }

    tracing::debug!(
        crew = %definition.name,
        tasks = tasks.len(),
        agents = agents.len(),
        "Built crew"
    );

    Ok(Crew::new(definition.name.clone(), agents, tasks)?
        .with_process(definition.process.unwrap_or(default_process)))
}
