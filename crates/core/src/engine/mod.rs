//! Crew execution engine.
//!
//! The CrewEngine runs a validated [`Crew`] against a reasoning runtime,
//! feeding each task the results of its dependencies and reporting progress
//! on the event channel.

pub mod emitter;

use crate::agents::base::ReasoningRuntime;
use crate::crew::{Crew, CrewError, Task, TaskError, TaskExecutionError};
use crate::engine::emitter::StepEmitter;
use crate::state::run::{
    begin_task, complete_run, complete_task, create_run, fail_run, log_to_run, start_run,
};
use ck_protocol::crew_models::Process;
use ck_protocol::ipc::Event;
use ck_protocol::run_models::{CrewOutput, CrewRun, TaskOutput};
use ck_protocol::step_models::DisplayEvent;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinSet;

type TaskFailure = Box<TaskExecutionError>;

/// The main crew execution engine.
pub struct CrewEngine {
    runtime: Arc<dyn ReasoningRuntime>,
}

impl CrewEngine {
    pub fn new(runtime: Arc<dyn ReasoningRuntime>) -> Self {
        Self { runtime }
    }

    /// Run every task of `crew` and return their outputs in declaration
    /// order.
    ///
    /// The first failing task aborts the run: tasks that have not started
    /// are never executed, and the error carries the failing task's
    /// identity, its context, and every display event emitted so far.
    ///
    /// # Arguments
    ///
    /// * `crew` - The crew to run; its tasks must not have run before
    /// * `events_tx` - Channel for run, task and step events
    pub async fn kickoff(
        &self,
        crew: &Crew,
        events_tx: Sender<Event>,
    ) -> Result<CrewOutput, CrewError> {
        let mut run = create_run(crew.name());

        let _ = events_tx
            .send(Event::RunStarted {
                run_id: run.id,
                crew_name: crew.name().to_string(),
                task_count: crew.tasks().len(),
            })
            .await;

        start_run(&mut run, &events_tx).await;

        log_to_run(
            &mut run,
            &events_tx,
            format!(
                "Kicking off crew '{}' with {} task(s) ({})",
                crew.name(),
                crew.tasks().len(),
                crew.process()
            ),
        )
        .await;

        let result = match crew.process() {
            Process::Sequential => self.run_sequential(crew, &mut run, &events_tx).await,
            Process::Concurrent => self.run_concurrent(crew, &mut run, &events_tx).await,
        };

        match result {
            Ok(tasks_output) => {
                complete_run(&mut run, &events_tx).await;
                Ok(CrewOutput {
                    run_id: run.id,
                    tasks_output,
                    transcript: run.transcript,
                })
            }
            Err(failure) => {
                fail_run(
                    &mut run,
                    &events_tx,
                    failure.task_index,
                    &failure.task_name,
                    failure.source.to_string(),
                )
                .await;
                Err(CrewError::TaskExecution(failure))
            }
        }
    }

    async fn run_sequential(
        &self,
        crew: &Crew,
        run: &mut CrewRun,
        events_tx: &Sender<Event>,
    ) -> Result<Vec<TaskOutput>, TaskFailure> {
        let mut outputs = Vec::with_capacity(crew.tasks().len());

        for (index, task) in crew.tasks().iter().enumerate() {
            // Dependencies precede their dependents, so this only fails when
            // a task was already run outside this crew.
            let context = task
                .resolve_context()
                .map_err(|source| task_failure(index, task, Vec::new(), &outputs, run, source))?;

            begin_task(run, events_tx, index, task.name(), task.agent().role()).await;

            let emitter = StepEmitter::new(run.id, index, events_tx.clone());
            let (emitted, result) = execute_isolated(
                Arc::clone(task),
                context.clone(),
                Arc::clone(&self.runtime),
                emitter,
            )
            .await;
            run.transcript.extend(emitted);

            match result {
                Ok(output) => {
                    complete_task(run, events_tx, index, &output).await;
                    outputs.push(output);
                }
                Err(source) => {
                    return Err(task_failure(index, task, context, &outputs, run, source));
                }
            }
        }

        Ok(outputs)
    }

    /// Start every task whose dependencies are complete and whose agent is
    /// idle, then wait for the next one to settle. An agent works on one
    /// task at a time, so its step callback sees one task's steps in order.
    /// After the first failure nothing new is started; tasks already in
    /// flight are awaited and their results kept.
    async fn run_concurrent(
        &self,
        crew: &Crew,
        run: &mut CrewRun,
        events_tx: &Sender<Event>,
    ) -> Result<Vec<TaskOutput>, TaskFailure> {
        let tasks = crew.tasks();
        let mut outputs: Vec<Option<TaskOutput>> = vec![None; tasks.len()];
        let mut waiting: BTreeSet<usize> = (0..tasks.len()).collect();
        let mut running: BTreeSet<usize> = BTreeSet::new();
        let mut contexts: HashMap<usize, Vec<String>> = HashMap::new();
        let mut in_flight = JoinSet::new();
        let mut failure: Option<TaskFailure> = None;

        loop {
            if failure.is_none() {
                let ready: Vec<usize> = waiting
                    .iter()
                    .copied()
                    .filter(|&index| {
                        crew.dependencies_of(index)
                            .iter()
                            .all(|&dependency| outputs[dependency].is_some())
                    })
                    .collect();

                for index in ready {
                    let agent = tasks[index].agent();
                    if running
                        .iter()
                        .any(|&other| Arc::ptr_eq(tasks[other].agent(), agent))
                    {
                        continue;
                    }
                    waiting.remove(&index);
                    let task = Arc::clone(&tasks[index]);

                    let context = match task.resolve_context() {
                        Ok(context) => context,
                        Err(source) => {
                            let completed = settled(&outputs);
                            failure = Some(task_failure(
                                index,
                                &task,
                                Vec::new(),
                                &completed,
                                run,
                                source,
                            ));
                            break;
                        }
                    };

                    begin_task(run, events_tx, index, task.name(), task.agent().role()).await;
                    contexts.insert(index, context.clone());
                    running.insert(index);

                    let runtime = Arc::clone(&self.runtime);
                    let emitter = StepEmitter::new(run.id, index, events_tx.clone());
                    in_flight.spawn(async move {
                        let (emitted, result) =
                            execute_isolated(task, context, runtime, emitter).await;
                        (index, emitted, result)
                    });
                }
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };
            let (index, emitted, result) = match joined {
                Ok(settled_task) => settled_task,
                Err(e) => {
                    tracing::error!("Task supervisor failed: {e}");
                    continue;
                }
            };

            running.remove(&index);
            run.transcript.extend(emitted);
            match result {
                Ok(output) => {
                    complete_task(run, events_tx, index, &output).await;
                    outputs[index] = Some(output);
                }
                Err(source) if failure.is_none() => {
                    let completed = settled(&outputs);
                    let context = contexts.remove(&index).unwrap_or_default();
                    failure = Some(task_failure(
                        index,
                        &tasks[index],
                        context,
                        &completed,
                        run,
                        source,
                    ));
                }
                Err(source) => {
                    tracing::warn!(
                        task = %tasks[index].name(),
                        error = %source,
                        "Task failed after the run was aborted"
                    );
                }
            }
        }

        if let Some(mut failure) = failure {
            // Tasks that were in flight at the failure have settled since.
            failure.completed = settled(&outputs);
            failure.transcript = run.transcript.clone();
            return Err(failure);
        }

        let mut completed = Vec::with_capacity(tasks.len());
        for (index, output) in outputs.into_iter().enumerate() {
            match output {
                Some(output) => completed.push(output),
                None => {
                    let source = tasks[index]
                        .resolve_context()
                        .err()
                        .unwrap_or_else(|| TaskError::Aborted("task never started".to_string()));
                    return Err(task_failure(
                        index,
                        &tasks[index],
                        Vec::new(),
                        &completed,
                        run,
                        source,
                    ));
                }
            }
        }

        Ok(completed)
    }
}

/// Run `task` on its own tokio task so a panicking runtime is reported as
/// `TaskError::Aborted` for that task instead of unwinding through the run.
/// The display events of a panicked task are lost.
async fn execute_isolated(
    task: Arc<Task>,
    context: Vec<String>,
    runtime: Arc<dyn ReasoningRuntime>,
    mut emitter: StepEmitter,
) -> (Vec<DisplayEvent>, Result<TaskOutput, TaskError>) {
    let handle = tokio::spawn(async move {
        let result = task.execute(&context, runtime.as_ref(), &mut emitter).await;
        (emitter.into_emitted(), result)
    });
    match handle.await {
        Ok(settled) => settled,
        Err(e) => (Vec::new(), Err(TaskError::Aborted(e.to_string()))),
    }
}

fn settled(outputs: &[Option<TaskOutput>]) -> Vec<TaskOutput> {
    outputs.iter().flatten().cloned().collect()
}

fn task_failure(
    index: usize,
    task: &Task,
    context: Vec<String>,
    completed: &[TaskOutput],
    run: &CrewRun,
    source: TaskError,
) -> TaskFailure {
    tracing::warn!(
        task = %task.name(),
        agent = %task.agent().role(),
        error = %source,
        "Task failed"
    );
    Box::new(TaskExecutionError {
        task_index: index,
        task_name: task.name().to_string(),
        agent_role: task.agent().role().to_string(),
        context,
        completed: completed.to_vec(),
        transcript: run.transcript.clone(),
        source,
    })
}
