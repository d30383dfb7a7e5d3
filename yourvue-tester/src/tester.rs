use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::scenario::{Scenario, ScenarioCtx};
use crate::util::{artifacts_dir, write_failure_artifacts};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct Tester {
    ctx: ScenarioCtx,
    artifacts: Option<PathBuf>,
}

impl Tester {
    pub const fn new(ctx: ScenarioCtx, artifacts: Option<PathBuf>) -> Self {
        Self { ctx, artifacts }
    }

    pub fn run_scenario(
        &self,
        scenario: &Scenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        seeds
            .iter()
            .map(|&seed| {
                if self.ctx.verbose {
                    println!(
                        "🧪 Testing scenario: {} (seed: {seed})",
                        scenario.name.bright_white()
                    );
                }
                self.run_single_scenario(scenario, seed, iterations)
            })
            .collect()
    }

    fn run_single_scenario(&self, scenario: &Scenario, seed: u64, iterations: usize) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let ctx = ScenarioCtx {
                seed: iteration_seed,
                ..self.ctx.clone()
            };
            let mut driver = ctx.fresh_driver();
            let start_time = Instant::now();
            match (scenario.run)(&ctx, &mut driver) {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.ctx.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?}) stage:{} t:{}ms",
                            i + 1,
                            iterations,
                            driver.stage(),
                            driver.now()
                        );
                    }
                }
                Err(err) => {
                    failures.push(format!(
                        "Iteration {} (seed {iteration_seed}, stage {}, t={}ms): {err:#}",
                        i + 1,
                        driver.stage(),
                        driver.now()
                    ));
                    if self.ctx.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            format!("{err:#}").red()
                        );
                    }
                    if let Some(base) = &self.artifacts {
                        let dir = artifacts_dir(base, scenario.key, iteration_seed);
                        let snapshot = driver.snapshot_json().ok();
                        if let Err(write_err) = write_failure_artifacts(&dir, snapshot.as_deref(), &err) {
                            log::warn!("could not write artifacts to {}: {write_err:#}", dir.display());
                        }
                    }
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::find_scenario;
    use crate::driver::WizardDriver;
    use yourvue_wizard::WizardConfig;

    fn ctx() -> ScenarioCtx {
        ScenarioCtx {
            seed: 0,
            cfg: WizardConfig::default(),
            steps: 50,
            state_dir: std::env::temp_dir().join("yourvue-tester-unit"),
            verbose: false,
        }
    }

    fn always_fails(_ctx: &ScenarioCtx, _driver: &mut WizardDriver) -> anyhow::Result<()> {
        anyhow::bail!("deliberate failure")
    }

    #[test]
    fn passing_scenario_reports_every_iteration() {
        let tester = Tester::new(ctx(), None);
        let smoke = find_scenario("smoke").unwrap();
        let results = tester.run_scenario(smoke, &[3, 4], 2);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed && r.successful_iterations == 2));
        assert_eq!(results[1].seed, 4);
    }

    #[test]
    fn failures_are_collected_with_their_seed() {
        let tester = Tester::new(ctx(), None);
        let broken = Scenario {
            key: "broken",
            name: "Broken",
            description: "always fails",
            run: always_fails,
        };
        let results = tester.run_scenario(&broken, &[10], 3);
        let result = &results[0];
        assert!(!result.passed);
        assert_eq!(result.failures.len(), 3);
        assert!(result.failures[2].contains("seed 12"));
        assert_eq!(result.average_duration, Duration::ZERO);
    }

    #[test]
    fn results_serialize_durations_as_millis() {
        let result = ScenarioResult {
            scenario_name: "Smoke".into(),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(12),
            performance_data: vec![Duration::from_millis(12)],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 12);
        let back: ScenarioResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.performance_data, vec![Duration::from_millis(12)]);
    }
}
