// Copyright 2025 Cowboy AI, LLC.

//! Batch reset of content items to their workflow's initial stage
//!
//! The sweep is deliberately thin: for each item of each target category,
//! resolve the category's initial stage and write the item's association.
//! Resolution runs per item and is never cached, so configuration edits
//! made mid-sweep are observed by later items. One item's failure never
//! aborts the batch; every item gets its own outcome in the report.

use crate::errors::{WorkflowError, WorkflowResult};
use crate::identifiers::{CategoryId, ExtensionType, ItemId, StageId};
use crate::resolver::WorkflowResolver;
use crate::store::{AssociationStore, ContentItemSource};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Overall status of a reset sweep, in scheduler terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Every item was reset
    Ok,

    /// Nothing to do: no items and no failures
    NoItems,

    /// Some items were reset, some failed
    PartialFailure,

    /// Nothing was reset and at least one failure occurred
    Failed,
}

/// Classification of a per-item failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A category, workflow, stage, or default was missing
    NotFound,

    /// Category ancestry was malformed
    Cycle,

    /// The association write failed
    Write,

    /// The backing store failed or held unusable data
    Storage,
}

impl From<&WorkflowError> for FailureKind {
    fn from(err: &WorkflowError) -> Self {
        if err.is_not_found() {
            FailureKind::NotFound
        } else if err.is_cycle() {
            FailureKind::Cycle
        } else if err.is_write_failure() {
            FailureKind::Write
        } else {
            FailureKind::Storage
        }
    }
}

/// What happened to one item during the sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResetOutcome {
    /// The item's association now points at the stage
    Reset {
        /// The initial stage that was written
        stage: StageId,
    },

    /// The item was not reset
    Failed {
        /// Failure classification
        kind: FailureKind,
        /// Human-readable failure description
        message: String,
    },
}

/// Per-item record in a [`ResetReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItemOutcome {
    /// The target category the item was listed under
    pub category: CategoryId,

    /// The item
    pub item: ItemId,

    /// The content subsystem the item belongs to
    pub extension: ExtensionType,

    /// What happened
    pub outcome: ResetOutcome,
}

/// A category whose items could not even be listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryFailure {
    /// The category whose listing failed
    pub category: CategoryId,

    /// Human-readable failure description
    pub message: String,
}

/// Result of one reset sweep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResetReport {
    /// When the sweep started
    pub started_at: DateTime<Utc>,

    /// When the sweep finished
    pub finished_at: DateTime<Utc>,

    /// One record per item encountered
    pub outcomes: Vec<ItemOutcome>,

    /// Categories whose item listing failed outright
    pub category_failures: Vec<CategoryFailure>,
}

impl ResetReport {
    /// Number of items successfully reset
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, ResetOutcome::Reset { .. }))
            .count()
    }

    /// Number of items that failed, not counting category-level failures
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Iterate the failed item outcomes
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, ResetOutcome::Failed { .. }))
    }

    /// Collapse the report into a scheduler status
    pub fn status(&self) -> TaskStatus {
        let failures = self.failed() + self.category_failures.len();
        match (self.succeeded(), failures) {
            (0, 0) => TaskStatus::NoItems,
            (_, 0) => TaskStatus::Ok,
            (0, _) => TaskStatus::Failed,
            _ => TaskStatus::PartialFailure,
        }
    }
}

/// Sweeps target categories, resetting every item to its initial stage
pub struct InitialStageReset {
    resolver: WorkflowResolver,
    items: Arc<dyn ContentItemSource>,
    associations: Arc<dyn AssociationStore>,
}

impl InitialStageReset {
    /// Create a sweep over the given collaborators
    pub fn new(
        resolver: WorkflowResolver,
        items: Arc<dyn ContentItemSource>,
        associations: Arc<dyn AssociationStore>,
    ) -> Self {
        Self {
            resolver,
            items,
            associations,
        }
    }

    /// Reset one item to the initial stage of its category's workflow
    ///
    /// Exposed so callers can retry individual failures out of a report.
    /// Returns the stage that was written.
    pub async fn reset_item(
        &self,
        category: CategoryId,
        item: ItemId,
        extension: &ExtensionType,
    ) -> WorkflowResult<StageId> {
        let stage = self.resolver.resolve_initial_stage(category).await?;
        self.associations
            .set_stage(item, extension, stage)
            .await
            .map_err(|e| match e {
                WorkflowError::WriteFailed { .. } => e,
                other => WorkflowError::WriteFailed {
                    item,
                    reason: other.to_string(),
                },
            })?;
        Ok(stage)
    }

    /// Reset every item in the target categories
    ///
    /// Never fails as a whole: per-item and per-category failures are
    /// recorded in the report and the sweep moves on.
    pub async fn run(&self, targets: &[CategoryId]) -> ResetReport {
        let started_at = Utc::now();
        let mut outcomes = Vec::new();
        let mut category_failures = Vec::new();

        for &category in targets {
            let items = match self.items.items_in_category(category).await {
                Ok(items) => items,
                Err(err) => {
                    warn!(%category, %err, "failed to list items for category");
                    category_failures.push(CategoryFailure {
                        category,
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            if items.is_empty() {
                debug!(%category, "category has no items");
                continue;
            }

            for content_item in items {
                let outcome = match self
                    .reset_item(category, content_item.id, &content_item.extension)
                    .await
                {
                    Ok(stage) => {
                        debug!(%category, item = %content_item.id, %stage, "item reset to initial stage");
                        ResetOutcome::Reset { stage }
                    }
                    Err(err) => {
                        warn!(%category, item = %content_item.id, %err, "failed to reset item");
                        ResetOutcome::Failed {
                            kind: FailureKind::from(&err),
                            message: err.to_string(),
                        }
                    }
                };
                outcomes.push(ItemOutcome {
                    category,
                    item: content_item.id,
                    extension: content_item.extension,
                    outcome,
                });
            }
        }

        let report = ResetReport {
            started_at,
            finished_at: Utc::now(),
            outcomes,
            category_failures,
        };
        info!(
            total = report.outcomes.len(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            category_failures = report.category_failures.len(),
            status = ?report.status(),
            "initial stage reset finished"
        );
        report
    }
}
