// Copyright 2025 Cowboy AI, LLC.

//! Storage interfaces for workflow resolution and stage reset
//!
//! The category tree, workflow configuration, content listing, and stage
//! associations all live in external storage. Each concern is reached
//! through its own narrow trait so implementations can be injected at
//! construction time and faked in tests.

use crate::category::WorkflowSetting;
use crate::errors::WorkflowResult;
use crate::identifiers::{CategoryId, ExtensionType, ItemId, StageId, WorkflowId};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A content item as listed by a [`ContentItemSource`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContentItem {
    /// The item's id in the content subsystem
    pub id: ItemId,

    /// The content subsystem the item belongs to
    pub extension: ExtensionType,
}

impl ContentItem {
    /// Create an article item (the default extension)
    pub fn article(id: ItemId) -> Self {
        Self {
            id,
            extension: ExtensionType::article(),
        }
    }
}

/// Read access to the category tree and its workflow configuration
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// The stored workflow setting of a category
    async fn workflow_setting(&self, category: CategoryId) -> WorkflowResult<WorkflowSetting>;

    /// The parent of a category, `None` for roots
    async fn parent_id(&self, category: CategoryId) -> WorkflowResult<Option<CategoryId>>;
}

/// Read access to the workflow configuration table
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// The id of the workflow marked as the site default
    async fn default_workflow_id(&self) -> WorkflowResult<WorkflowId>;
}

/// Read access to workflow stage definitions
#[async_trait]
pub trait StageStore: Send + Sync {
    /// The default ("initial") stage of a workflow
    async fn default_stage_id(&self, workflow: WorkflowId) -> WorkflowResult<StageId>;
}

/// Read access to the content items of a category
#[async_trait]
pub trait ContentItemSource: Send + Sync {
    /// All items currently in a category; empty if the category has none
    async fn items_in_category(&self, category: CategoryId) -> WorkflowResult<Vec<ContentItem>>;
}

/// Write access to the stage association table
#[async_trait]
pub trait AssociationStore: Send + Sync {
    /// Set the current stage of one `(item, extension)` association
    async fn set_stage(
        &self,
        item: ItemId,
        extension: &ExtensionType,
        stage: StageId,
    ) -> WorkflowResult<()>;
}
