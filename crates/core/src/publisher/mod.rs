//! The Publish Orchestrator.
//!
//! One cycle selects the oldest unpublished article, rewrites it, submits it
//! to the hosting service, records the result and notifies the administrator.
//! An optional scheduler triggers cycles on a fixed interval.

mod config;
mod runner;
mod scheduler;
mod types;

pub use config::PublisherConfig;
pub use runner::PublishOrchestrator;
pub use scheduler::PublishScheduler;
pub use types::{
    resolve_schedule, CycleError, CycleOutcome, CycleRequest, PublishReport, Schedule,
};
