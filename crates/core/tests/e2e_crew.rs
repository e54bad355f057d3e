//! End-to-end tests: initialize a project, load it, build a crew from its
//! definitions and run it.

mod common;

use common::*;
use ck_core::agents::{CommandRuntime, ReasoningRuntime, RuntimeFactory, ScriptedRuntime};
use ck_core::config::load_config;
use ck_core::crew::{build_crew, CrewError};
use ck_core::engine::CrewEngine;
use ck_core::inputs::DatasetPreview;
use ck_protocol::crew_models::Process;
use ck_protocol::run_models::RunStatus;
use ck_protocol::step_models::DisplayKind;
use std::collections::HashMap;
use std::sync::Arc;

fn inputs_for(project: &std::path::Path) -> HashMap<String, String> {
    let data_path = write_dataset(project).expect("Failed to write dataset");
    let mut inputs = DatasetPreview::from_path(&data_path)
        .expect("Failed to read dataset")
        .into_inputs();
    inputs.insert(
        "question".to_string(),
        "Which iris species is a flower?".to_string(),
    );
    inputs
}

#[tokio::test]
async fn test_ml_assistant_dry_run() {
    let project = create_test_project().await;
    let config = load_config(project.path()).await.expect("Failed to load config");
    let definition = config.find_crew("ml-assistant").expect("crew should exist");

    let crew = build_crew(
        definition,
        &config.agents,
        &inputs_for(project.path()),
        config.global.process,
    )
    .expect("template crew should be valid");

    assert_eq!(crew.tasks().len(), 8);
    assert_eq!(crew.agents().len(), 5, "Summarization_Agent has no task");
    let assess = &crew.tasks()[1];
    assert!(assess.description().contains("iris.csv"));
    assert!(assess.description().contains("sepal_length"));
    assert!(assess.description().contains("6 rows"));
    assert!(crew.tasks()[0]
        .description()
        .contains("Which iris species is a flower?"));

    let runtime = ScriptedRuntime::new();
    let engine = CrewEngine::new(Arc::new(runtime.clone()));
    let (tx, events) = event_collector(config.global.event_buffer);

    let output = engine.kickoff(&crew, tx).await.expect("dry run should complete");
    let events = events.await.unwrap();

    assert_eq!(output.tasks_output.len(), 8);
    assert_eq!(
        output.final_output(),
        Some("[dry-run] explain-code completed with 2 context item(s)")
    );

    let generate_code_context = runtime.context_for("generate-code").unwrap();
    assert_eq!(
        generate_code_context,
        vec![
            "[dry-run] define-problem completed with 0 context item(s)".to_string(),
            "[dry-run] recommend-model completed with 2 context item(s)".to_string(),
            "[dry-run] research-docs completed with 1 context item(s)".to_string(),
        ]
    );

    let request = &runtime.requests()[3];
    assert_eq!(request.agent.role, "Researcher");
    assert_eq!(request.agent.tools.len(), 2);
    assert!(request.prompt().contains("This is the context you're working with:"));

    assert_event_sequence(&events);
    assert!(has_status_update(&events, RunStatus::Completed));
    assert_eq!(
        output
            .transcript
            .iter()
            .filter(|e| e.kind == DisplayKind::FinalAnswer)
            .count(),
        8
    );
}

#[tokio::test]
async fn test_ml_assistant_concurrent_matches_sequential_outputs() {
    let project = create_test_project().await;
    let config = load_config(project.path()).await.unwrap();
    let definition = config.find_crew("ml-assistant").unwrap();
    let inputs = inputs_for(project.path());

    let mut outputs = Vec::new();
    for process in [Process::Sequential, Process::Concurrent] {
        let crew = build_crew(definition, &config.agents, &inputs, process).unwrap();
        assert_eq!(crew.process(), process);

        let engine = CrewEngine::new(Arc::new(ScriptedRuntime::new()));
        let (tx, _events) = event_collector(100);
        let output = engine.kickoff(&crew, tx).await.unwrap();
        outputs.push(output.tasks_output);
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[tokio::test]
async fn test_dry_run_runtime_from_factory() {
    let project = create_test_project().await;
    let config = load_config(project.path()).await.unwrap();

    let runtime = RuntimeFactory::create(&config.global, project.path(), true).unwrap();
    assert!(runtime.check_availability().await);

    let no_runtime = RuntimeFactory::create(&config.global, project.path(), false);
    assert!(no_runtime.is_err(), "template config has no [runtime]");
}

#[tokio::test]
async fn test_command_runtime_end_to_end() {
    let project = tempfile::tempdir().unwrap();
    let script = r#"read request
echo '{"type":"intermediate","action":"tool='"'"'web search'"'"' tool_input='"'"'iris'"'"' ","observation":"[1, 2]"}'
echo '{"type":"final","output":"done"}'"#;
    let runtime = CommandRuntime::new(
        "sh",
        vec!["-c".to_string(), script.to_string()],
        project.path().to_string_lossy(),
    );
    assert!(runtime.check_availability().await);

    let crew = problem_data_model_crew();
    let engine = CrewEngine::new(Arc::new(runtime));
    let (tx, events) = event_collector(100);

    let output = engine.kickoff(&crew, tx).await.expect("command runtime should answer");
    let events = events.await.unwrap();

    assert_eq!(output.final_output(), Some("done"));
    assert_eq!(
        step_kinds(&events, 0),
        vec![
            DisplayKind::ToolUsed,
            DisplayKind::ToolInput,
            DisplayKind::ObservationJson,
            DisplayKind::FinalAnswer,
        ]
    );
}

#[tokio::test]
async fn test_command_runtime_without_final_answer_fails_run() {
    let project = tempfile::tempdir().unwrap();
    let runtime = CommandRuntime::new(
        "sh",
        vec![
            "-c".to_string(),
            r#"read request; echo '{"type":"bare","text":"hmm"}'"#.to_string(),
        ],
        project.path().to_string_lossy(),
    );

    let crew = problem_data_model_crew();
    let engine = CrewEngine::new(Arc::new(runtime));
    let (tx, _events) = event_collector(100);

    let result = engine.kickoff(&crew, tx).await;

    let Err(CrewError::TaskExecution(failure)) = result else {
        panic!("Expected a task execution error");
    };
    assert_eq!(failure.task_index, 0);
    assert!(failure.to_string().contains("without a final answer"));
}
