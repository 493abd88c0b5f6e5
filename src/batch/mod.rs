//! Batch projection of scenario files

mod loader;
mod runner;

pub use loader::{load_scenarios, load_scenarios_from_reader, Scenario};
pub use runner::{run_scenarios, write_summary_csv, ScenarioOutcome};
