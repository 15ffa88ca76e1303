// Copyright 2025 Cowboy AI, LLC.

//! Workflow and stage definitions
//!
//! A workflow is an ordered set of stages; exactly one stage is the default
//! ("initial") stage, and exactly one workflow in the configuration table is
//! the site default. Both uniqueness rules are enforced here on mutation.

use crate::errors::{WorkflowError, WorkflowResult};
use crate::identifiers::{StageId, WorkflowId};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One step within a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Stage {
    /// Unique identifier of this stage
    pub id: StageId,

    /// The workflow this stage belongs to
    pub workflow_id: WorkflowId,

    /// Human-readable name for this stage
    pub name: String,

    /// Whether this is the workflow's default ("initial") stage
    pub is_default: bool,
}

impl Stage {
    /// Create a non-default stage
    pub fn new(id: StageId, workflow_id: WorkflowId, name: impl Into<String>) -> Self {
        Self {
            id,
            workflow_id,
            name: name.into(),
            is_default: false,
        }
    }

    /// Create the workflow's initial stage
    pub fn initial(id: StageId, workflow_id: WorkflowId, name: impl Into<String>) -> Self {
        Self {
            id,
            workflow_id,
            name: name.into(),
            is_default: true,
        }
    }
}

/// An approval/publication workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique identifier of this workflow
    pub id: WorkflowId,

    /// Human-readable name for this workflow
    pub name: String,

    /// Whether this is the site's default workflow
    pub is_default: bool,

    /// Stages in definition order
    stages: IndexMap<StageId, Stage>,
}

impl Workflow {
    /// Create a workflow with no stages
    pub fn new(id: WorkflowId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_default: false,
            stages: IndexMap::new(),
        }
    }

    /// Create the site's default workflow
    pub fn new_default(id: WorkflowId, name: impl Into<String>) -> Self {
        Self {
            is_default: true,
            ..Self::new(id, name)
        }
    }

    /// Append a stage, preserving definition order
    ///
    /// Fails if the stage belongs to a different workflow, if the stage id
    /// is already present, or if a second default stage is introduced.
    pub fn add_stage(&mut self, stage: Stage) -> WorkflowResult<()> {
        if stage.workflow_id != self.id {
            return Err(WorkflowError::InvariantViolation(format!(
                "stage {} belongs to workflow {}, not {}",
                stage.id, stage.workflow_id, self.id
            )));
        }
        if self.stages.contains_key(&stage.id) {
            return Err(WorkflowError::InvariantViolation(format!(
                "stage {} already present in workflow {}",
                stage.id, self.id
            )));
        }
        if stage.is_default && self.default_stage().is_some() {
            return Err(WorkflowError::InvariantViolation(format!(
                "workflow {} already has a default stage",
                self.id
            )));
        }
        self.stages.insert(stage.id, stage);
        Ok(())
    }

    /// The workflow's default ("initial") stage, if one is defined
    pub fn default_stage(&self) -> Option<&Stage> {
        self.stages.values().find(|s| s.is_default)
    }

    /// Look up a stage by id
    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.get(&id)
    }

    /// Iterate stages in definition order
    pub fn stages(&self) -> impl Iterator<Item = &Stage> {
        self.stages.values()
    }

    /// Number of stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_review_publish(id: u64) -> Workflow {
        let wf_id = WorkflowId::new(id);
        let mut wf = Workflow::new(wf_id, "Editorial");
        wf.add_stage(Stage::initial(StageId::new(1), wf_id, "Draft"))
            .unwrap();
        wf.add_stage(Stage::new(StageId::new(2), wf_id, "Review"))
            .unwrap();
        wf.add_stage(Stage::new(StageId::new(3), wf_id, "Published"))
            .unwrap();
        wf
    }

    #[test]
    fn test_default_stage_lookup() {
        let wf = draft_review_publish(10);
        let initial = wf.default_stage().unwrap();
        assert_eq!(initial.id, StageId::new(1));
        assert_eq!(initial.name, "Draft");
    }

    #[test]
    fn test_stage_order_is_preserved() {
        let wf = draft_review_publish(10);
        let names: Vec<&str> = wf.stages().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Draft", "Review", "Published"]);
        assert_eq!(wf.stage_count(), 3);
    }

    #[test]
    fn test_second_default_stage_is_rejected() {
        let wf_id = WorkflowId::new(10);
        let mut wf = Workflow::new(wf_id, "Editorial");
        wf.add_stage(Stage::initial(StageId::new(1), wf_id, "Draft"))
            .unwrap();
        let err = wf
            .add_stage(Stage::initial(StageId::new(2), wf_id, "Also default"))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvariantViolation(_)));
    }

    #[test]
    fn test_foreign_stage_is_rejected() {
        let mut wf = Workflow::new(WorkflowId::new(10), "Editorial");
        let foreign = Stage::new(StageId::new(1), WorkflowId::new(99), "Draft");
        assert!(wf.add_stage(foreign).is_err());
    }

    #[test]
    fn test_duplicate_stage_id_is_rejected() {
        let wf_id = WorkflowId::new(10);
        let mut wf = Workflow::new(wf_id, "Editorial");
        wf.add_stage(Stage::new(StageId::new(1), wf_id, "Draft"))
            .unwrap();
        assert!(wf
            .add_stage(Stage::new(StageId::new(1), wf_id, "Again"))
            .is_err());
    }

    #[test]
    fn test_workflow_without_default_stage() {
        let wf_id = WorkflowId::new(10);
        let mut wf = Workflow::new(wf_id, "Editorial");
        wf.add_stage(Stage::new(StageId::new(1), wf_id, "Draft"))
            .unwrap();
        assert!(wf.default_stage().is_none());
    }

    #[test]
    fn test_new_default_marks_site_default() {
        assert!(Workflow::new_default(WorkflowId::new(1), "Main").is_default);
        assert!(!Workflow::new(WorkflowId::new(2), "Other").is_default);
    }
}
