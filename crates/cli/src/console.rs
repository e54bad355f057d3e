//! Terminal rendering of crew events.

use ck_core::crew::TaskExecutionError;
use ck_protocol::ipc::Event;
use ck_protocol::run_models::CrewOutput;
use ck_protocol::step_models::{DisplayEvent, DisplayKind};
use colored::Colorize;
use tokio::sync::mpsc::Receiver;

const INDENT: &str = "    ";

/// Capitalize the first letter of every alphabetic run and lowercase the
/// rest: `"Problem_definition_AGENT"` becomes `"Problem_Definition_Agent"`.
pub fn title_case(role: &str) -> String {
    let mut result = String::with_capacity(role.len());
    let mut previous_is_alphabetic = false;

    for c in role.chars() {
        if c.is_alphabetic() {
            if previous_is_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_alphabetic = true;
        } else {
            result.push(c);
            previous_is_alphabetic = false;
        }
    }

    result
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("{INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn pretty_json(payload: &str) -> String {
    serde_json::from_str::<serde_json::Value>(payload)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| payload.to_string())
}

/// Render one display event as terminal text.
pub fn format_display_event(event: &DisplayEvent) -> String {
    let speaker = format!("{} {}", event.avatar, title_case(&event.agent_role).as_str().bold());

    match event.kind {
        DisplayKind::Thought => format!("{speaker}: {}", event.payload),
        DisplayKind::RawMarkdown => format!("{speaker}\n{}", indent(&event.payload)),
        DisplayKind::ToolUsed => format!("{INDENT}{} {}", "Tool Used:".cyan(), event.payload),
        DisplayKind::ToolInput => format!("{INDENT}{} {}", "Tool Input:".cyan(), event.payload),
        DisplayKind::ObservationImage => {
            format!("{INDENT}{} {}", "Tool Result (image):".cyan(), event.payload)
        }
        DisplayKind::ObservationJson => format!(
            "{INDENT}{}\n{}",
            "Tool Result:".cyan(),
            indent(&pretty_json(&event.payload))
        ),
        DisplayKind::ObservationText => {
            format!("{INDENT}{}\n{}", "Tool Result:".cyan(), indent(&event.payload))
        }
        DisplayKind::FinalAnswer => format!(
            "{speaker}\n{}\n{}",
            "Finished task:".green().bold(),
            event.payload
        ),
    }
}

/// Render an engine event, or `None` for events that only matter to logs.
pub fn format_event(event: &Event) -> Option<String> {
    match event {
        Event::RunStarted {
            crew_name,
            task_count,
            ..
        } => Some(format!(
            "{} {crew_name} ({task_count} task(s))",
            "Crew".bold()
        )),
        Event::TaskStarted {
            task_index,
            task_name,
            agent_role,
            ..
        } => {
            let line = format!(
                "\n[{}] {task_name} ({})",
                task_index + 1,
                title_case(agent_role)
            );
            Some(line.as_str().dimmed().to_string())
        }
        Event::Step { event, .. } => Some(format_display_event(event)),
        Event::RunCompleted { .. } => Some(format!("\n{}", "Crew finished".green().bold())),
        Event::RunFailed {
            task_name, error, ..
        } => Some(format!(
            "\n{} task '{task_name}': {error}",
            "Crew failed at".red().bold()
        )),
        Event::RunStatusUpdate { .. } | Event::TaskCompleted { .. } | Event::RunLog { .. } => {
            None
        }
    }
}

/// Print events until every sender is dropped.
pub async fn render_events(mut events_rx: Receiver<Event>) {
    while let Some(event) = events_rx.recv().await {
        if let Some(text) = format_event(&event) {
            println!("{text}");
        }
    }
}

pub fn print_summary(output: &CrewOutput) {
    println!(
        "{} {} task(s) completed, {} step event(s)",
        "Summary:".bold(),
        output.tasks_output.len(),
        output.transcript.len()
    );
}

pub fn print_failure(failure: &TaskExecutionError) {
    eprintln!(
        "{} task '{}' (#{}) assigned to {}",
        "Failed:".red().bold(),
        failure.task_name,
        failure.task_index + 1,
        title_case(&failure.agent_role)
    );
    eprintln!("{INDENT}cause: {}", failure.source);
    eprintln!(
        "{INDENT}context items: {}, completed tasks: {}, step events: {}",
        failure.context.len(),
        failure.completed.len(),
        failure.transcript.len()
    );
}
