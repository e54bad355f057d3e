//! Crew run state machine.
//!
//! Each function applies one transition to a [`CrewRun`] and reports it on
//! the event channel. Send failures are ignored: a run keeps going when
//! nobody is listening.

use chrono::Utc;
use ck_protocol::ipc::Event;
use ck_protocol::run_models::{CrewRun, RunStatus, TaskOutput};
use tokio::sync::mpsc::Sender;
use uuid::Uuid;

/// Create a new run with Pending status.
pub fn create_run(crew_name: impl Into<String>) -> CrewRun {
    CrewRun {
        id: Uuid::new_v4(),
        crew_name: crew_name.into(),
        status: RunStatus::Pending,
        current_task: 0,
        logs: Vec::new(),
        transcript: Vec::new(),
        started_at: Utc::now(),
        completed_at: None,
    }
}

async fn send_status(run: &CrewRun, events_tx: &Sender<Event>) {
    let _ = events_tx
        .send(Event::RunStatusUpdate {
            run_id: run.id,
            status: run.status,
            task_index: run.current_task,
        })
        .await;
}

/// Transition the run to Running status and emit event.
pub async fn start_run(run: &mut CrewRun, events_tx: &Sender<Event>) {
    run.status = RunStatus::Running;
    tracing::info!(run_id = %run.id, crew = %run.crew_name, "Run started");
    send_status(run, events_tx).await;
}

/// Mark task `task_index` as the current one and announce it.
pub async fn begin_task(
    run: &mut CrewRun,
    events_tx: &Sender<Event>,
    task_index: usize,
    task_name: &str,
    agent_role: &str,
) {
    run.current_task = task_index;
    let _ = events_tx
        .send(Event::TaskStarted {
            run_id: run.id,
            task_index,
            task_name: task_name.to_string(),
            agent_role: agent_role.to_string(),
        })
        .await;
    log_to_run(
        run,
        events_tx,
        format!("Executing task '{task_name}' with agent {agent_role}"),
    )
    .await;
}

/// Report the result of task `task_index`.
pub async fn complete_task(
    run: &mut CrewRun,
    events_tx: &Sender<Event>,
    task_index: usize,
    output: &TaskOutput,
) {
    let _ = events_tx
        .send(Event::TaskCompleted {
            run_id: run.id,
            task_index,
            task_name: output.task_name.clone(),
            output: output.raw.clone(),
        })
        .await;
    log_to_run(
        run,
        events_tx,
        format!("Task '{}' completed", output.task_name),
    )
    .await;
}

/// Mark the run as completed and emit event.
pub async fn complete_run(run: &mut CrewRun, events_tx: &Sender<Event>) {
    run.status = RunStatus::Completed;
    run.completed_at = Some(Utc::now());
    tracing::info!(run_id = %run.id, crew = %run.crew_name, "Run completed");
    send_status(run, events_tx).await;
    let _ = events_tx.send(Event::RunCompleted { run_id: run.id }).await;
}

/// Mark the run as failed at `task_index` and emit event.
pub async fn fail_run(
    run: &mut CrewRun,
    events_tx: &Sender<Event>,
    task_index: usize,
    task_name: &str,
    error: String,
) {
    run.status = RunStatus::Failed;
    run.current_task = task_index;
    run.completed_at = Some(Utc::now());
    tracing::warn!(
        run_id = %run.id,
        task = %task_name,
        %error,
        "Run failed"
    );
    send_status(run, events_tx).await;
    let _ = events_tx
        .send(Event::RunFailed {
            run_id: run.id,
            task_index,
            task_name: task_name.to_string(),
            error,
        })
        .await;
}

/// Append a log line to the run and emit event.
pub async fn log_to_run(run: &mut CrewRun, events_tx: &Sender<Event>, content: String) {
    tracing::debug!(run_id = %run.id, "{content}");
    run.logs.push(content.clone());
    let _ = events_tx
        .send(Event::RunLog {
            run_id: run.id,
            content,
        })
        .await;
}
