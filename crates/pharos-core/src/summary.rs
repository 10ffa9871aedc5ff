//! Per-pair outcome accumulation for one run.
//!
//! Pair failures never abort the batch; they are recorded here and surfaced
//! through the process exit status instead of being lost in the log.

use crate::device::DeviceProfile;
use std::fmt;

/// Pipeline stage at which a (URL, device) pair failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Audit,
    Extraction,
    ReportWrite,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureStage::Audit => "audit",
            FailureStage::Extraction => "extraction",
            FailureStage::ReportWrite => "report write",
        };
        f.write_str(name)
    }
}

/// One failed (URL, device) pair
#[derive(Debug, Clone)]
pub struct PairFailure {
    pub url: String,
    pub device: DeviceProfile,
    pub stage: FailureStage,
    pub message: String,
}

impl PairFailure {
    pub fn new(
        url: impl Into<String>,
        device: DeviceProfile,
        stage: FailureStage,
        message: impl fmt::Display,
    ) -> Self {
        Self {
            url: url.into(),
            device,
            stage,
            message: message.to_string(),
        }
    }
}

/// Accumulated outcomes of a full run
#[derive(Debug, Default)]
pub struct RunSummary {
    completed: usize,
    failures: Vec<PairFailure>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.completed += 1;
    }

    pub fn record_failure(&mut self, failure: PairFailure) {
        self.failures.push(failure);
    }

    /// Pairs that made it all the way into the report
    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn failures(&self) -> &[PairFailure] {
        &self.failures
    }

    pub fn attempted(&self) -> usize {
        self.completed + self.failures.len()
    }

    /// Process exit status: zero only when every attempted pair succeeded
    pub fn exit_code(&self) -> i32 {
        if self.failures.is_empty() { 0 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_run_exits_zero() {
        let mut summary = RunSummary::new();
        summary.record_success();
        summary.record_success();

        assert_eq!(summary.completed(), 2);
        assert_eq!(summary.attempted(), 2);
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn empty_run_exits_zero() {
        assert_eq!(RunSummary::new().exit_code(), 0);
    }

    #[test]
    fn any_pair_failure_flips_the_exit_code() {
        let mut summary = RunSummary::new();
        summary.record_success();
        summary.record_failure(PairFailure::new(
            "https://example.com",
            DeviceProfile::Mobile,
            FailureStage::Audit,
            "lighthouse exited with status 1",
        ));

        assert_eq!(summary.attempted(), 2);
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(summary.failures()[0].stage, FailureStage::Audit);
    }
}
