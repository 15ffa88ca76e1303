// Copyright 2025 Cowboy AI, LLC.

//! Error types for workflow resolution and stage reset operations

use crate::identifiers::{CategoryId, ItemId, WorkflowId};
use thiserror::Error;

/// Errors that can occur while resolving workflows or resetting stages
#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    /// Category not found
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Workflow not found
    #[error("Workflow not found: {0}")]
    WorkflowNotFound(WorkflowId),

    /// No workflow is marked as the site default
    #[error("No default workflow is configured")]
    NoDefaultWorkflow,

    /// A workflow exists but has no default stage
    #[error("Workflow {workflow} has no default stage")]
    StageNotFound {
        /// The workflow whose default stage is missing
        workflow: WorkflowId,
    },

    /// Ancestry resolution revisited a category or exceeded the depth bound
    #[error("Cycle detected while resolving workflow for category {category} after visiting {depth} ancestors")]
    CycleDetected {
        /// The category at which the walk gave up
        category: CategoryId,
        /// Number of categories visited before giving up
        depth: usize,
    },

    /// Workflow inheritance was requested on a category with no parent
    #[error("Category {category} inherits its workflow but has no parent")]
    InheritanceFromRoot {
        /// The root category carrying the inherited setting
        category: CategoryId,
    },

    /// A stored workflow setting could not be interpreted
    #[error("Invalid workflow setting: {value}")]
    InvalidSetting {
        /// The offending persisted value or parse failure
        value: String,
    },

    /// Invariant violation
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Writing the stage association failed for a single item
    #[error("Failed to write stage for item {item}: {reason}")]
    WriteFailed {
        /// The item whose association update failed
        item: ItemId,
        /// Backend-provided reason
        reason: String,
    },

    /// Backend storage failure
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl WorkflowError {
    /// Check if this is a not-found error (missing category, workflow,
    /// stage, or default)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WorkflowError::CategoryNotFound(_)
                | WorkflowError::WorkflowNotFound(_)
                | WorkflowError::NoDefaultWorkflow
                | WorkflowError::StageNotFound { .. }
                | WorkflowError::InheritanceFromRoot { .. }
        )
    }

    /// Check if this error indicates malformed category ancestry
    pub fn is_cycle(&self) -> bool {
        matches!(self, WorkflowError::CycleDetected { .. })
    }

    /// Check if this is a per-item write failure
    pub fn is_write_failure(&self) -> bool {
        matches!(self, WorkflowError::WriteFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = WorkflowError::CategoryNotFound(CategoryId::new(12));
        assert_eq!(err.to_string(), "Category not found: 12");

        let err = WorkflowError::WorkflowNotFound(WorkflowId::new(42));
        assert_eq!(err.to_string(), "Workflow not found: 42");

        let err = WorkflowError::NoDefaultWorkflow;
        assert_eq!(err.to_string(), "No default workflow is configured");

        let err = WorkflowError::StageNotFound {
            workflow: WorkflowId::new(7),
        };
        assert_eq!(err.to_string(), "Workflow 7 has no default stage");

        let err = WorkflowError::CycleDetected {
            category: CategoryId::new(3),
            depth: 5,
        };
        assert_eq!(
            err.to_string(),
            "Cycle detected while resolving workflow for category 3 after visiting 5 ancestors"
        );

        let err = WorkflowError::InheritanceFromRoot {
            category: CategoryId::new(1),
        };
        assert_eq!(
            err.to_string(),
            "Category 1 inherits its workflow but has no parent"
        );

        let err = WorkflowError::InvalidSetting {
            value: "use_nothing".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid workflow setting: use_nothing");

        let err = WorkflowError::InvariantViolation("two default workflows".to_string());
        assert_eq!(err.to_string(), "Invariant violation: two default workflows");

        let err = WorkflowError::WriteFailed {
            item: ItemId::new(99),
            reason: "connection reset".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to write stage for item 99: connection reset"
        );

        let err = WorkflowError::Storage("bucket unavailable".to_string());
        assert_eq!(err.to_string(), "Storage error: bucket unavailable");
    }

    #[test]
    fn test_is_not_found() {
        assert!(WorkflowError::CategoryNotFound(CategoryId::new(1)).is_not_found());
        assert!(WorkflowError::WorkflowNotFound(WorkflowId::new(1)).is_not_found());
        assert!(WorkflowError::NoDefaultWorkflow.is_not_found());
        assert!(WorkflowError::StageNotFound {
            workflow: WorkflowId::new(1),
        }
        .is_not_found());
        assert!(WorkflowError::InheritanceFromRoot {
            category: CategoryId::new(1),
        }
        .is_not_found());

        assert!(!WorkflowError::CycleDetected {
            category: CategoryId::new(1),
            depth: 2,
        }
        .is_not_found());
        assert!(!WorkflowError::Storage("x".to_string()).is_not_found());
        assert!(!WorkflowError::InvariantViolation("x".to_string()).is_not_found());
    }

    #[test]
    fn test_helper_method_exclusivity() {
        let cycle = WorkflowError::CycleDetected {
            category: CategoryId::new(1),
            depth: 2,
        };
        assert!(cycle.is_cycle());
        assert!(!cycle.is_not_found());
        assert!(!cycle.is_write_failure());

        let write = WorkflowError::WriteFailed {
            item: ItemId::new(5),
            reason: "timeout".to_string(),
        };
        assert!(write.is_write_failure());
        assert!(!write.is_cycle());
        assert!(!write.is_not_found());
    }

    #[test]
    fn test_error_clone() {
        let original = WorkflowError::InvalidSetting {
            value: "garbage".to_string(),
        };
        let cloned = original.clone();
        assert_eq!(original.to_string(), cloned.to_string());
    }
}
