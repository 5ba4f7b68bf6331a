use colored::Colorize;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use upsell_core::LandingConfig;

use crate::scenarios::{Scenario, ScenarioCtx};

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
}

pub struct ScenarioRunner<'a> {
    config: &'a LandingConfig,
    verbose: bool,
}

impl<'a> ScenarioRunner<'a> {
    pub const fn new(config: &'a LandingConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }

    /// Run one scenario for every seed; iteration `i` reseeds with `seed + i`.
    pub fn run_scenario(
        &self,
        scenario: &Scenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::with_capacity(seeds.len());

        for &seed in seeds {
            if self.verbose {
                println!(
                    "{} {} (seed {seed})",
                    "▶".cyan(),
                    scenario.key.bold()
                );
            }

            let mut failures = Vec::new();
            let mut successful = 0;
            let mut elapsed = Duration::ZERO;

            for i in 0..iterations {
                let iteration_seed = seed.wrapping_add(i as u64);
                let mut ctx = ScenarioCtx {
                    config: self.config,
                    rng: ChaCha20Rng::seed_from_u64(iteration_seed),
                    verbose: self.verbose,
                };
                let started = Instant::now();
                let outcome = (scenario.run)(&mut ctx);
                elapsed += started.elapsed();

                match outcome {
                    Ok(()) => successful += 1,
                    Err(e) => {
                        log::debug!("{} seed {iteration_seed} failed: {e:#}", scenario.key);
                        failures.push(format!("seed {iteration_seed}: {e:#}"));
                    }
                }
            }

            let average_duration = u32::try_from(iterations)
                .ok()
                .filter(|n| *n > 0)
                .map_or(Duration::ZERO, |n| elapsed / n);

            results.push(ScenarioResult {
                scenario_name: scenario.key.to_string(),
                seed,
                passed: iterations > 0 && successful == iterations,
                iterations_run: iterations,
                successful_iterations: successful,
                failures,
                average_duration,
            });
        }

        results
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::get_scenario;
    use anyhow::bail;
    use upsell_core::Product;

    fn always_fails(_: &mut ScenarioCtx<'_>) -> anyhow::Result<()> {
        bail!("boom")
    }

    #[test]
    fn passing_scenario_counts_every_iteration() {
        let config = LandingConfig {
            products: vec![Product::new("card", 190, "Card")],
            ..LandingConfig::default()
        };
        let runner = ScenarioRunner::new(&config, false);
        let scenario = get_scenario("toggle-parity").expect("registered");
        let results = runner.run_scenario(scenario, &[1, 2], 3);
        assert_eq!(results.len(), 2);
        for result in results {
            assert!(result.passed, "{:?}", result.failures);
            assert_eq!(result.iterations_run, 3);
            assert_eq!(result.successful_iterations, 3);
        }
    }

    #[test]
    fn failures_carry_the_iteration_seed() {
        let config = LandingConfig::default();
        let runner = ScenarioRunner::new(&config, false);
        let scenario = Scenario {
            key: "broken",
            description: "always fails",
            run: always_fails,
        };
        let results = runner.run_scenario(&scenario, &[10], 2);
        let result = &results[0];
        assert!(!result.passed);
        assert_eq!(result.successful_iterations, 0);
        assert_eq!(result.failures, vec!["seed 10: boom", "seed 11: boom"]);
    }

    #[test]
    fn zero_iterations_do_not_count_as_passing() {
        let config = LandingConfig::default();
        let runner = ScenarioRunner::new(&config, false);
        let scenario = get_scenario("smoke").expect("registered");
        let results = runner.run_scenario(scenario, &[1], 0);
        assert_eq!(results[0].average_duration, Duration::ZERO);
        assert_eq!(results[0].iterations_run, 0);
        assert!(!results[0].passed);
    }

    #[test]
    fn result_serializes_duration_as_millis() {
        let result = ScenarioResult {
            scenario_name: "smoke".into(),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(12),
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["average_duration"], 12);
        let back: ScenarioResult = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.average_duration, Duration::from_millis(12));
    }
}
