//! Common test utilities shared by the integration tests.
//!
//! - Fixtures (agents, crews, project directories)
//! - Assertions over event streams
//! - Mock runtimes

pub mod assertions;
pub mod fixtures;
pub mod mock_runtimes;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_runtimes::*;
