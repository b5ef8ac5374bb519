//! Structured fixture records.
//!
//! The fixture binary emits one JSONL record per lifecycle stage on stdout.
//! Tests parse these lines to prove the scenario was entered and — more
//! importantly — that control never survived past its fatal point.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

/// Fixture lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// The scenario is about to run.
    Enter,
    /// Control returned from a scenario that must abort.
    Survived,
}

/// One JSONL line from the fixture binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub scenario: String,
    pub stage: Stage,
}

impl FixtureRecord {
    /// Record marking scenario entry.
    pub fn enter(scenario: Scenario) -> Self {
        Self {
            scenario: scenario.cli_name().to_owned(),
            stage: Stage::Enter,
        }
    }

    /// Record marking that a scenario failed to abort.
    pub fn survived(scenario: Scenario) -> Self {
        Self {
            scenario: scenario.cli_name().to_owned(),
            stage: Stage::Survived,
        }
    }

    /// Writes the record as one JSON line on stdout and flushes it, so the
    /// line is observable even though the process dies right after.
    pub fn emit(&self) {
        let mut out = std::io::stdout().lock();
        if let Ok(line) = serde_json::to_string(self) {
            let _ = writeln!(out, "{line}");
            let _ = out.flush();
        }
    }
}
