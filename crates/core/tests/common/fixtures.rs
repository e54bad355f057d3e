//! Test fixtures for building crews and sample projects.

use ck_core::agents::Agent;
use ck_core::crew::{Crew, Task};
use ck_protocol::ipc::Event;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;

pub fn agent(role: &str) -> Arc<Agent> {
    Arc::new(Agent::new(role, format!("Act as {role}")).with_avatar("🧪"))
}

/// The three-task crew from the data-science assistant:
/// define-problem, assess-data (needs define-problem) and recommend-model
/// (needs both).
#[allow(dead_code)]
pub fn problem_data_model_crew() -> Crew {
    let define = Arc::new(Task::new(
        "define-problem",
        "Clarify the machine learning problem",
        agent("Problem_Definition_Agent"),
        "A clear problem definition",
    ));
    let assess = Arc::new(
        Task::new(
            "assess-data",
            "Assess the dataset",
            agent("Data_Assessment_Agent"),
            "A data assessment",
        )
        .depends_on(&define),
    );
    let recommend = Arc::new(
        Task::new(
            "recommend-model",
            "Recommend suitable models",
            agent("Model_Recommendation_Agent"),
            "A ranked list of models",
        )
        .depends_on(&define)
        .depends_on(&assess),
    );

    Crew::from_tasks("ml-assistant", vec![define, assess, recommend])
        .expect("fixture crew should be valid")
}

/// `n` tasks `t1..tn` where every task depends on all its predecessors.
#[allow(dead_code)]
pub fn chain_crew(n: usize) -> Crew {
    let worker = agent("Worker");
    let mut tasks: Vec<Arc<Task>> = Vec::with_capacity(n);
    for i in 1..=n {
        let task = Task::new(
            format!("t{i}"),
            format!("Step {i}"),
            Arc::clone(&worker),
            "text",
        )
        .with_dependencies(tasks.clone());
        tasks.push(Arc::new(task));
    }
    Crew::from_tasks("chain", tasks).expect("fixture crew should be valid")
}

/// Start collecting every event sent on a fresh channel.
///
/// The returned handle resolves once all senders are dropped.
#[allow(dead_code)]
pub fn event_collector(
    buffer: usize,
) -> (mpsc::Sender<Event>, tokio::task::JoinHandle<Vec<Event>>) {
    let (tx, mut rx) = mpsc::channel(buffer);
    let handle = tokio::spawn(async move {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    });
    (tx, handle)
}

#[allow(dead_code)]
pub const IRIS_CSV: &str = "sepal_length,sepal_width,petal_length,petal_width,species
5.1,3.5,1.4,0.2,setosa
4.9,3.0,1.4,0.2,setosa
7.0,3.2,4.7,1.4,versicolor
6.4,3.2,4.5,1.5,versicolor
6.3,3.3,6.0,2.5,virginica
5.8,2.7,5.1,1.9,virginica
";

/// Write `IRIS_CSV` into `dir` and return its path.
#[allow(dead_code)]
pub fn write_dataset(dir: &Path) -> std::io::Result<std::path::PathBuf> {
    let path = dir.join("iris.csv");
    std::fs::write(&path, IRIS_CSV)?;
    Ok(path)
}

/// A temporary project with an initialized `.crew-kit/` directory.
#[allow(dead_code)]
pub async fn create_test_project() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    ck_core::init::generate_crew_kit_structure(ck_core::init::InitOptions {
        target_dir: dir.path().to_path_buf(),
        force: false,
        minimal: false,
    })
    .await
    .expect("Failed to initialize project");
    dir
}
