// file: src/models/collection.rs
// description: outcomes and reports for collection bootstrap operations
// reference: internal data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsureOutcome {
    Created,
    AlreadyPresent,
}

impl fmt::Display for EnsureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnsureOutcome::Created => write!(f, "created"),
            EnsureOutcome::AlreadyPresent => write!(f, "already present"),
        }
    }
}

/// Result of the optional prompt seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "documents", rename_all = "snake_case")]
pub enum SeedOutcome {
    Inserted(u64),
    SkippedNonEmpty(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOutcome {
    pub collection: String,
    pub outcome: EnsureOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitReport {
    pub database: String,
    pub outcomes: Vec<CollectionOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<SeedOutcome>,
    pub completed_at: DateTime<Utc>,
}

impl InitReport {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            outcomes: Vec::new(),
            seed: None,
            completed_at: Utc::now(),
        }
    }

    pub fn record(&mut self, collection: &str, outcome: EnsureOutcome) {
        self.outcomes.push(CollectionOutcome {
            collection: collection.to_string(),
            outcome,
        });
        self.completed_at = Utc::now();
    }

    pub fn created(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == EnsureOutcome::Created)
            .map(|o| o.collection.as_str())
    }

    pub fn outcome_for(&self, collection: &str) -> Option<EnsureOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.collection == collection)
            .map(|o| o.outcome)
    }

    pub fn is_noop(&self) -> bool {
        self.created().next().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionCount {
    pub collection: String,
    pub exists: bool,
    pub documents: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_tracks_outcomes() {
        let mut report = InitReport::new("up_db");
        report.record("documents", EnsureOutcome::Created);
        report.record("summaries", EnsureOutcome::AlreadyPresent);

        assert_eq!(report.created().collect::<Vec<_>>(), vec!["documents"]);
        assert_eq!(
            report.outcome_for("summaries"),
            Some(EnsureOutcome::AlreadyPresent)
        );
        assert_eq!(report.outcome_for("system_prompts"), None);
        assert!(!report.is_noop());
    }

    #[test]
    fn test_outcome_json_shape() {
        let mut report = InitReport::new("up_db");
        report.record("documents", EnsureOutcome::AlreadyPresent);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["database"], "up_db");
        assert_eq!(value["outcomes"][0]["outcome"], "already_present");
        assert!(value.get("seed").is_none());
        assert!(report.is_noop());
    }

    #[test]
    fn test_seed_outcome_in_json() {
        let mut report = InitReport::new("up_db");
        report.record("documents", EnsureOutcome::Created);
        report.seed = Some(SeedOutcome::Inserted(2));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value["seed"],
            serde_json::json!({ "status": "inserted", "documents": 2 })
        );
    }
}
