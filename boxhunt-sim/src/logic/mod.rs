pub mod orchestrator;
pub mod plan;
pub mod reports;

pub use orchestrator::{RunSummary, run_trials};
pub use plan::RunPlan;
