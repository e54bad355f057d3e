//! Runtimes with observable timing and failure behavior.

use async_trait::async_trait;
use ck_core::agents::{ReasoningRuntime, RuntimeError, ScriptedRuntime, StepStream, TaskRequest};
use ck_protocol::step_models::RawStep;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Answers every task after `delay` and records how many tasks were being
/// worked on at the same time.
#[derive(Clone)]
pub struct ConcurrencyGauge {
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl ConcurrencyGauge {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReasoningRuntime for ConcurrencyGauge {
    async fn check_availability(&self) -> bool {
        true
    }

    async fn execute(&self, request: &TaskRequest) -> Result<StepStream, RuntimeError> {
        let in_flight = Arc::clone(&self.in_flight);
        let max_in_flight = Arc::clone(&self.max_in_flight);
        let delay = self.delay;
        let answer = format!(
            "{} done with {} context item(s)",
            request.task_name,
            request.context.len()
        );

        Ok(Box::pin(async_stream::stream! {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            max_in_flight.fetch_max(now, Ordering::SeqCst);
            yield Ok(RawStep::bare("working"));
            tokio::time::sleep(delay).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            yield Ok(RawStep::final_answer(answer));
        }))
    }
}

/// Delegates to a scripted runtime but panics when asked to run one task.
pub struct PanickingRuntime {
    panic_on: String,
    inner: ScriptedRuntime,
}

#[allow(dead_code)]
impl PanickingRuntime {
    pub fn new(panic_on: &str) -> Self {
        Self {
            panic_on: panic_on.to_string(),
            inner: ScriptedRuntime::new(),
        }
    }
}

#[async_trait]
impl ReasoningRuntime for PanickingRuntime {
    async fn check_availability(&self) -> bool {
        true
    }

    async fn execute(&self, request: &TaskRequest) -> Result<StepStream, RuntimeError> {
        if request.task_name == self.panic_on {
            panic!("runtime crashed while running {}", request.task_name);
        }
        self.inner.execute(request).await
    }
}

/// Fails one task as soon as it starts; every other task answers after
/// `delay`.
pub struct FailFastRuntime {
    fail_on: String,
    delay: Duration,
}

#[allow(dead_code)]
impl FailFastRuntime {
    pub fn new(fail_on: &str, delay: Duration) -> Self {
        Self {
            fail_on: fail_on.to_string(),
            delay,
        }
    }
}

#[async_trait]
impl ReasoningRuntime for FailFastRuntime {
    async fn check_availability(&self) -> bool {
        true
    }

    async fn execute(&self, request: &TaskRequest) -> Result<StepStream, RuntimeError> {
        let fails = request.task_name == self.fail_on;
        let delay = self.delay;
        let answer = format!("{} done", request.task_name);

        Ok(Box::pin(async_stream::stream! {
            if fails {
                yield Err(RuntimeError::Execution("quota exceeded".to_string()));
            } else {
                tokio::time::sleep(delay).await;
                yield Ok(RawStep::final_answer(answer));
            }
        }))
    }
}
