//! Pipeline configuration: which simplification strategy to run and the
//! scheduler/router/placer options table of §6.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One of the driver's composite simplification strategies (§4.5).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimplifyStrategy {
    ToZGraph,
    HadamardReduce,
    InteriorClifford,
    Clifford,
    FullReduce,
    SymbolicReduce,
}

impl Default for SimplifyStrategy {
    fn default() -> Self {
        SimplifyStrategy::FullReduce
    }
}

/// Configuration for the ZX simplification driver.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    pub strategy: SimplifyStrategy,
}

/// `scheduler` option.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerKind {
    Base,
    Static,
    Random,
    Greedy,
    Search,
}

impl Default for SchedulerKind {
    fn default() -> Self {
        SchedulerKind::Greedy
    }
}

/// `router` option.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterKind {
    Apsp,
    Duostra,
}

impl Default for RouterKind {
    fn default() -> Self {
        RouterKind::Duostra
    }
}

/// `placer` option.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacerKind {
    Static,
    Random,
    Dfs,
}

impl Default for PlacerKind {
    fn default() -> Self {
        PlacerKind::Static
    }
}

/// `available`/`cost` options: which extreme to select when combining
/// per-qubit busy times or picking a greedy-fallback candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extremum {
    Min,
    Max,
}

/// `candidates` option: a top-K truncation, or unbounded (`ERROR_CODE` in
/// the original source).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Candidates {
    Limited(usize),
    Unbounded,
}

impl Default for Candidates {
    fn default() -> Self {
        Candidates::Unbounded
    }
}

/// Scheduler/router/placer configuration — the option table of §6.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub scheduler: SchedulerKind,
    pub router: RouterKind,
    pub placer: PlacerKind,
    /// Prefer a lower logical id as the stationary SWAP endpoint.
    pub orient: bool,
    pub candidates: Candidates,
    pub apsp_coeff: u32,
    pub available: Extremum,
    pub cost: Extremum,
    /// Search scheduler look-ahead depth.
    pub depth: usize,
    pub never_cache: bool,
    pub single_immediately: bool,
    /// RNG seed for the Random placer/scheduler.
    pub seed: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            scheduler: SchedulerKind::default(),
            router: RouterKind::default(),
            placer: PlacerKind::default(),
            orient: true,
            candidates: Candidates::default(),
            apsp_coeff: 1,
            available: Extremum::Max,
            cost: Extremum::Min,
            depth: 2,
            never_cache: false,
            single_immediately: true,
            seed: 0,
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub simplify: SimplifyConfig,
    pub scheduler: SchedulerConfig,
}

impl PipelineConfig {
    pub fn from_json(s: &str) -> Result<PipelineConfig> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_defaults() {
        let cfg = SchedulerConfig::default();
        assert_eq!(cfg.router, RouterKind::Duostra);
        assert_eq!(cfg.placer, PlacerKind::Static);
        assert!(cfg.single_immediately);
        assert_eq!(cfg.candidates, Candidates::Unbounded);
    }

    #[test]
    fn json_roundtrip() {
        let cfg = PipelineConfig {
            simplify: SimplifyConfig {
                strategy: SimplifyStrategy::Clifford,
            },
            scheduler: SchedulerConfig {
                depth: 5,
                candidates: Candidates::Limited(8),
                ..SchedulerConfig::default()
            },
        };
        let json = cfg.to_json().unwrap();
        let parsed = PipelineConfig::from_json(&json).unwrap();
        assert_eq!(parsed.simplify.strategy, SimplifyStrategy::Clifford);
        assert_eq!(parsed.scheduler.depth, 5);
        assert_eq!(parsed.scheduler.candidates, Candidates::Limited(8));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let parsed = PipelineConfig::from_json("{}").unwrap();
        assert_eq!(parsed.scheduler.router, RouterKind::Duostra);
    }
}
