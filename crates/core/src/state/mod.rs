//! Run state for crew executions.
//!
//! A [`CrewRun`](ck_protocol::run_models::CrewRun) is owned by a single
//! kickoff and carries the logs and transcript of that run only.

pub mod run;
