//! Named scenarios and the loop that replays them over seeds.

mod price_sync;
mod random_ops;
mod smoke;

use anyhow::Result;
use colored::Colorize;
use orderdesk_core::{DEFAULT_COMMISSION_RATE, Money, NewLineItem, Quantity};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Smoke,
    RandomOps,
    PriceSync,
}

impl Scenario {
    pub const ALL: [Self; 3] = [Self::Smoke, Self::RandomOps, Self::PriceSync];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Smoke => "smoke",
            Self::RandomOps => "random-ops",
            Self::PriceSync => "price-sync",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Smoke => "Add and remove a fixed set of items and check the totals",
            Self::RandomOps => "Seeded random add/remove sequences checked after every step",
            Self::PriceSync => "Out-of-order price-list responses; stale ones must be dropped",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    async fn run_once(self, seed: u64) -> Result<()> {
        match self {
            Self::Smoke => smoke::run(),
            Self::RandomOps => random_ops::run(seed),
            Self::PriceSync => price_sync::run(seed).await,
        }
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    Scenario::ALL
        .iter()
        .map(|s| (s.key(), s.description()))
        .collect()
}

/// A line item with the default commission.
fn line_item(product_id: &str, quantity: Quantity, unit_price: Money) -> NewLineItem {
    NewLineItem {
        product_id: product_id.to_string(),
        product_name: format!("Product {product_id}"),
        quantity,
        unit_price,
        commission_rate: DEFAULT_COMMISSION_RATE,
    }
}

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

pub struct ScenarioRunner {
    verbose: bool,
}

impl ScenarioRunner {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// One result per seed. Iteration `i` runs with `seed + i`.
    pub async fn run(
        &self,
        scenario: Scenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::with_capacity(seeds.len());
        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (seed: {seed})",
                    scenario.key().bright_white()
                );
            }
            results.push(self.run_seed(scenario, seed, iterations).await);
        }
        results
    }

    async fn run_seed(&self, scenario: Scenario, seed: u64, iterations: usize) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut elapsed = Duration::ZERO;

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let start = Instant::now();
            let outcome = scenario.run_once(iteration_seed).await;
            elapsed += start.elapsed();
            match outcome {
                Ok(()) => successes += 1,
                Err(err) => {
                    log::warn!("{} seed {iteration_seed} failed: {err:#}", scenario.key());
                    if self.verbose {
                        println!("  ❌ Iteration {}/{iterations} failed: {}", i + 1, format!("{err:#}").red());
                    }
                    failures.push(format!("Iteration {} (seed {iteration_seed}): {err:#}", i + 1));
                }
            }
        }

        let average_duration = if iterations == 0 {
            Duration::ZERO
        } else {
            elapsed / u32::try_from(iterations).unwrap_or(u32::MAX)
        };

        ScenarioResult {
            scenario_name: scenario.key().to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
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
