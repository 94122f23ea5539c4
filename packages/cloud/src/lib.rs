//! Berth Cloud Package
//!
//! Loads the AWS SDK configuration for a profile and discovers ECS workloads:
//! clusters, services, tasks and containers, plus the log targets and
//! session-manager targets derived from them.

pub mod ecs;
pub mod error;
pub mod sdk;
pub mod types;

// Re-export commonly used types
pub use ecs::EcsClient;
pub use error::{CloudError, CloudResult};
pub use sdk::load_sdk_config;
pub use types::{Cluster, Container, Service, Task};
