use anyhow::{Context, Result, ensure};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::ScenarioCtx;
use crate::driver::WizardDriver;
use crate::{invariants, policy};

/// Longest idle gap between two commands.
const MAX_PAUSE_MS: u64 = 1_500;

pub fn random_walk(ctx: &ScenarioCtx, driver: &mut WizardDriver) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
    let storage = driver.storage();
    let mut completed = 0;
    for step in 0..ctx.steps {
        driver.advance(rng.gen_range(0..MAX_PAUSE_MS));
        let command = policy::next_command(&mut rng, &driver.snapshot());
        let name = command.name();
        let outcome = driver.send(command);
        log::trace!("step {step}: {name} -> {outcome:?}");

        let snapshot = driver.snapshot();
        invariants::check(storage.as_ref(), &snapshot)
            .with_context(|| format!("after step {step} ({name})"))?;
        ensure!(
            snapshot.completed_stages.len() >= completed,
            "step {step} ({name}) un-completed a stage"
        );
        completed = snapshot.completed_stages.len();
    }
    let (applied, rejected) = driver.counts();
    if ctx.verbose {
        println!(
            "     ↳ seed {} reached stage {} ({applied} applied, {rejected} rejected)",
            ctx.seed,
            driver.stage()
        );
    }
    Ok(())
}
