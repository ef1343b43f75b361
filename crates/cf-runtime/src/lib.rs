#![forbid(unsafe_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_PARALLEL_MIN_ROWS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    Sequential,
    Parallel,
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid engine policy: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Execution configuration for column-wise work.
///
/// Results never depend on the mode; parallel execution only spreads
/// independent per-column work across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnginePolicy {
    pub mode: ExecutionMode,
    #[serde(default = "default_parallel_min_rows")]
    pub parallel_min_rows: usize,
}

fn default_parallel_min_rows() -> usize {
    DEFAULT_PARALLEL_MIN_ROWS
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self::sequential()
    }
}

impl EnginePolicy {
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            mode: ExecutionMode::Sequential,
            parallel_min_rows: DEFAULT_PARALLEL_MIN_ROWS,
        }
    }

    /// Parallel mode with an explicit row threshold; tables smaller than
    /// `parallel_min_rows` still run sequentially.
    #[must_use]
    pub fn parallel(parallel_min_rows: usize) -> Self {
        Self {
            mode: ExecutionMode::Parallel,
            parallel_min_rows,
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Pick the execution mode for work touching `columns` columns of `rows`
    /// rows each, recording the decision in `ledger`.
    pub fn decide_execution(
        &self,
        subject: &str,
        rows: usize,
        columns: usize,
        ledger: &mut DecisionLedger,
    ) -> ExecutionMode {
        let mode = match self.mode {
            ExecutionMode::Parallel if rows >= self.parallel_min_rows && columns > 1 => {
                ExecutionMode::Parallel
            }
            _ => ExecutionMode::Sequential,
        };
        debug!("{subject}: {mode:?} execution over {columns} columns x {rows} rows");
        ledger.push(DecisionRecord {
            ts_unix_ms: now_unix_ms(),
            subject: subject.to_owned(),
            requested: self.mode,
            chosen: mode,
            rows,
            columns,
        });
        mode
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub ts_unix_ms: u64,
    pub subject: String,
    pub requested: ExecutionMode,
    pub chosen: ExecutionMode,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionLedger {
    records: Vec<DecisionRecord>,
}

impl DecisionLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: DecisionRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }
}

fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::{DecisionLedger, EnginePolicy, ExecutionMode};

    #[test]
    fn default_policy_is_sequential() {
        let policy = EnginePolicy::default();
        let mut ledger = DecisionLedger::new();
        let mode = policy.decide_execution("sort", 1_000_000, 8, &mut ledger);
        assert_eq!(mode, ExecutionMode::Sequential);
        assert_eq!(ledger.records().len(), 1);
    }

    #[test]
    fn parallel_policy_respects_row_threshold() {
        let policy = EnginePolicy::parallel(100);
        let mut ledger = DecisionLedger::new();
        assert_eq!(
            policy.decide_execution("sort", 99, 4, &mut ledger),
            ExecutionMode::Sequential
        );
        assert_eq!(
            policy.decide_execution("sort", 100, 4, &mut ledger),
            ExecutionMode::Parallel
        );
        let last = &ledger.records()[1];
        assert_eq!(last.requested, ExecutionMode::Parallel);
        assert_eq!(last.chosen, ExecutionMode::Parallel);
        assert_eq!((last.rows, last.columns), (100, 4));
    }

    #[test]
    fn single_column_work_never_goes_parallel() {
        let policy = EnginePolicy::parallel(0);
        let mut ledger = DecisionLedger::new();
        assert_eq!(
            policy.decide_execution("sort", 10, 1, &mut ledger),
            ExecutionMode::Sequential
        );
    }

    #[test]
    fn policy_parses_from_json_with_default_threshold() {
        let policy = EnginePolicy::from_json_str(r#"{"mode":"parallel"}"#).expect("parse");
        assert_eq!(policy, EnginePolicy::parallel(4096));

        let err = EnginePolicy::from_json_str(r#"{"mode":"turbo"}"#).expect_err("bad mode");
        assert!(err.to_string().starts_with("invalid engine policy"));
    }
}
