// Copyright 2025 Cowboy AI, LLC.

//! In-memory implementation of the storage interfaces
//!
//! Backs all five store traits with one shared map, for tests and for
//! embedding without a database. Mutations enforce the configuration
//! invariants: at most one default workflow, at most one default stage per
//! workflow (the latter is enforced by [`Workflow::add_stage`]).

use crate::category::{Category, WorkflowSetting};
use crate::errors::{WorkflowError, WorkflowResult};
use crate::identifiers::{CategoryId, ExtensionType, ItemId, StageId, WorkflowId};
use crate::store::{
    AssociationStore, CategoryStore, ContentItem, ContentItemSource, StageStore, WorkflowStore,
};
use crate::workflow::Workflow;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    categories: IndexMap<CategoryId, Category>,
    workflows: IndexMap<WorkflowId, Workflow>,
    items: IndexMap<CategoryId, Vec<ContentItem>>,
    associations: HashMap<(ItemId, ExtensionType), StageId>,
}

/// In-memory store implementing all five storage interfaces
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryWorkflowStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category
    ///
    /// Fails if the id is already present. Parent links are not validated;
    /// tree shape is the administrator's responsibility, which is exactly
    /// why resolution guards against cycles.
    pub async fn insert_category(&self, category: Category) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        if state.categories.contains_key(&category.id) {
            return Err(WorkflowError::InvariantViolation(format!(
                "category {} already present",
                category.id
            )));
        }
        state.categories.insert(category.id, category);
        Ok(())
    }

    /// Insert a workflow with its stages
    ///
    /// Fails if the id is already present or if a second default workflow
    /// would be introduced.
    pub async fn insert_workflow(&self, workflow: Workflow) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        if state.workflows.contains_key(&workflow.id) {
            return Err(WorkflowError::InvariantViolation(format!(
                "workflow {} already present",
                workflow.id
            )));
        }
        if workflow.is_default && state.workflows.values().any(|w| w.is_default) {
            return Err(WorkflowError::InvariantViolation(
                "a default workflow is already configured".to_string(),
            ));
        }
        state.workflows.insert(workflow.id, workflow);
        Ok(())
    }

    /// Remove a workflow, e.g. to model an administrator deleting it
    pub async fn remove_workflow(&self, id: WorkflowId) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        state
            .workflows
            .shift_remove(&id)
            .map(|_| ())
            .ok_or(WorkflowError::WorkflowNotFound(id))
    }

    /// Make the given workflow the site default, clearing the previous one
    pub async fn set_default_workflow(&self, id: WorkflowId) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        if !state.workflows.contains_key(&id) {
            return Err(WorkflowError::WorkflowNotFound(id));
        }
        for workflow in state.workflows.values_mut() {
            workflow.is_default = workflow.id == id;
        }
        Ok(())
    }

    /// Place a content item in a category
    pub async fn add_item(&self, category: CategoryId, item: ContentItem) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        if !state.categories.contains_key(&category) {
            return Err(WorkflowError::CategoryNotFound(category));
        }
        state.items.entry(category).or_default().push(item);
        Ok(())
    }

    /// The current stage association of an item, if any
    pub async fn stage_of(&self, item: ItemId, extension: &ExtensionType) -> Option<StageId> {
        let state = self.state.read().await;
        state.associations.get(&(item, extension.clone())).copied()
    }
}

#[async_trait]
impl CategoryStore for InMemoryWorkflowStore {
    async fn workflow_setting(&self, category: CategoryId) -> WorkflowResult<WorkflowSetting> {
        let state = self.state.read().await;
        state
            .categories
            .get(&category)
            .map(|c| c.workflow_setting)
            .ok_or(WorkflowError::CategoryNotFound(category))
    }

    async fn parent_id(&self, category: CategoryId) -> WorkflowResult<Option<CategoryId>> {
        let state = self.state.read().await;
        state
            .categories
            .get(&category)
            .map(|c| c.parent_id)
            .ok_or(WorkflowError::CategoryNotFound(category))
    }
}

#[async_trait]
impl WorkflowStore for InMemoryWorkflowStore {
    async fn default_workflow_id(&self) -> WorkflowResult<WorkflowId> {
        let state = self.state.read().await;
        state
            .workflows
            .values()
            .find(|w| w.is_default)
            .map(|w| w.id)
            .ok_or(WorkflowError::NoDefaultWorkflow)
    }
}

#[async_trait]
impl StageStore for InMemoryWorkflowStore {
    async fn default_stage_id(&self, workflow: WorkflowId) -> WorkflowResult<StageId> {
        let state = self.state.read().await;
        let definition = state
            .workflows
            .get(&workflow)
            .ok_or(WorkflowError::WorkflowNotFound(workflow))?;
        definition
            .default_stage()
            .map(|s| s.id)
            .ok_or(WorkflowError::StageNotFound { workflow })
    }
}

#[async_trait]
impl ContentItemSource for InMemoryWorkflowStore {
    async fn items_in_category(&self, category: CategoryId) -> WorkflowResult<Vec<ContentItem>> {
        let state = self.state.read().await;
        Ok(state.items.get(&category).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl AssociationStore for InMemoryWorkflowStore {
    async fn set_stage(
        &self,
        item: ItemId,
        extension: &ExtensionType,
        stage: StageId,
    ) -> WorkflowResult<()> {
        let mut state = self.state.write().await;
        state.associations.insert((item, extension.clone()), stage);
        Ok(())
    }
}
