//! Named QA scenarios run against a headless wizard.

use anyhow::Result;
use std::path::PathBuf;

use yourvue_wizard::{MemoryStorage, WizardConfig};

use crate::driver::WizardDriver;

pub mod catalog;
pub mod random_walk;
pub mod steps;
pub mod walkthrough;

pub use catalog::{find_scenario, list_scenarios};

#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub seed: u64,
    pub cfg: WizardConfig,
    /// Commands per random walk.
    pub steps: usize,
    /// Where file-backed scenarios keep their storage.
    pub state_dir: PathBuf,
    pub verbose: bool,
}

impl ScenarioCtx {
    /// A driver over fresh in-memory storage.
    #[must_use]
    pub fn fresh_driver(&self) -> WizardDriver {
        WizardDriver::new(MemoryStorage::shared(), self.cfg.clone(), self.seed)
    }
}

pub type ScenarioFn = fn(&ScenarioCtx, &mut WizardDriver) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}
