//! Forwards a task's display events to the run's event channel.

use ck_protocol::ipc::Event;
use ck_protocol::step_models::DisplayEvent;
use tokio::sync::mpsc::Sender;
use uuid::Uuid;

/// Per-task event forwarder.
///
/// Keeps its own copy of everything it forwarded so the engine can append
/// the task's events to the run transcript once the task settles.
pub struct StepEmitter {
    run_id: Uuid,
    task_index: usize,
    events_tx: Sender<Event>,
    emitted: Vec<DisplayEvent>,
}

impl StepEmitter {
    pub fn new(run_id: Uuid, task_index: usize, events_tx: Sender<Event>) -> Self {
        Self {
            run_id,
            task_index,
            events_tx,
            emitted: Vec::new(),
        }
    }

    pub async fn emit(&mut self, event: DisplayEvent) {
        self.emitted.push(event.clone());
        let _ = self
            .events_tx
            .send(Event::Step {
                run_id: self.run_id,
                task_index: self.task_index,
                event,
            })
            .await;
    }

    pub fn task_index(&self) -> usize {
        self.task_index
    }

    pub fn emitted(&self) -> &[DisplayEvent] {
        &self.emitted
    }

    pub fn into_emitted(self) -> Vec<DisplayEvent> {
        self.emitted
    }
}
