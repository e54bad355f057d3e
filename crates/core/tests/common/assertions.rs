//! Assertion helpers over run event streams.

use ck_protocol::ipc::Event;
use ck_protocol::run_models::RunStatus;
use ck_protocol::step_models::DisplayKind;

pub fn has_status_update(events: &[Event], status: RunStatus) -> bool {
    events.iter().any(|e| {
        matches!(
            e,
            Event::RunStatusUpdate {
                status: s,
                ..
            } if *s == status
        )
    })
}

/// Names of started tasks, in the order they were started.
pub fn started_tasks(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::TaskStarted { task_name, .. } => Some(task_name.clone()),
            _ => None,
        })
        .collect()
}

/// Display kinds of the step events emitted for `task_index`.
pub fn step_kinds(events: &[Event], task_index: usize) -> Vec<DisplayKind> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Step {
                task_index: index,
                event,
                ..
            } if *index == task_index => Some(event.kind),
            _ => None,
        })
        .collect()
}

/// Checks that the run starts with `RunStarted` and ends with a terminal
/// event.
pub fn assert_event_sequence(events: &[Event]) {
    assert!(
        matches!(events.first(), Some(Event::RunStarted { .. })),
        "First event should be RunStarted, got: {:?}",
        events.first()
    );
    assert!(
        matches!(
            events.last(),
            Some(Event::RunCompleted { .. } | Event::RunFailed { .. })
        ),
        "Last event should be RunCompleted or RunFailed, got: {:?}",
        events.last()
    );
}
