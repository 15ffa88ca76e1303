// Copyright 2025 Cowboy AI, LLC.

//! Category-to-workflow resolution
//!
//! A category names its workflow directly, defers to the site default, or
//! inherits from its parent. Inheritance is resolved by walking the tree
//! upward until a concrete id or the default is reached. The walk is an
//! explicit loop with a visited set and a depth bound: the tree is supposed
//! to be acyclic, but resolution must not hang on malformed data.
//!
//! Resolution is read-only and deterministic: the same stored configuration
//! always yields the same result, and nothing is cached, so a configuration
//! change is visible to the very next call.

use crate::category::WorkflowSetting;
use crate::errors::{WorkflowError, WorkflowResult};
use crate::identifiers::{CategoryId, StageId, WorkflowId};
use crate::store::{CategoryStore, StageStore, WorkflowStore};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// How to interpret `use_inherited` on a category with no parent
///
/// The stored configuration allows a root category to request inheritance
/// even though there is nothing to inherit from. Callers choose how strict
/// to be about that.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RootSettingPolicy {
    /// Fail resolution with [`WorkflowError::InheritanceFromRoot`]
    #[default]
    Reject,

    /// Resolve to the site's default workflow instead
    FallBackToDefault,
}

/// Tuning for ancestry resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResolverPolicy {
    /// Interpretation of `use_inherited` on a root category
    pub root_setting: RootSettingPolicy,

    /// Upper bound on ancestors visited before declaring a cycle
    pub max_depth: usize,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            root_setting: RootSettingPolicy::default(),
            max_depth: 64,
        }
    }
}

/// Resolves a category to its workflow and initial stage
///
/// Holds read-only handles to the three configuration stores. Safe to call
/// any number of times in any order; it never writes and never caches.
pub struct WorkflowResolver {
    categories: Arc<dyn CategoryStore>,
    workflows: Arc<dyn WorkflowStore>,
    stages: Arc<dyn StageStore>,
    policy: ResolverPolicy,
}

impl WorkflowResolver {
    /// Create a resolver with the default policy
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        workflows: Arc<dyn WorkflowStore>,
        stages: Arc<dyn StageStore>,
    ) -> Self {
        Self::with_policy(categories, workflows, stages, ResolverPolicy::default())
    }

    /// Create a resolver with an explicit policy
    pub fn with_policy(
        categories: Arc<dyn CategoryStore>,
        workflows: Arc<dyn WorkflowStore>,
        stages: Arc<dyn StageStore>,
        policy: ResolverPolicy,
    ) -> Self {
        Self {
            categories,
            workflows,
            stages,
            policy,
        }
    }

    /// The policy this resolver runs under
    pub fn policy(&self) -> ResolverPolicy {
        self.policy
    }

    /// Resolve the concrete workflow id that applies to a category
    pub async fn resolve_workflow_id(&self, category: CategoryId) -> WorkflowResult<WorkflowId> {
        let mut visited: HashSet<CategoryId> = HashSet::new();
        let mut current = category;

        loop {
            let setting = self.categories.workflow_setting(current).await?;
            match setting {
                WorkflowSetting::Explicit(id) => {
                    debug!(%category, %current, workflow = %id, "category names its workflow");
                    return Ok(id);
                }
                WorkflowSetting::UseDefault => {
                    let id = self.workflows.default_workflow_id().await?;
                    debug!(%category, %current, workflow = %id, "category uses the default workflow");
                    return Ok(id);
                }
                WorkflowSetting::UseInherited => {
                    if !visited.insert(current) || visited.len() > self.policy.max_depth {
                        return Err(WorkflowError::CycleDetected {
                            category: current,
                            depth: visited.len(),
                        });
                    }
                    match self.categories.parent_id(current).await? {
                        Some(parent) => {
                            debug!(%category, %current, %parent, "workflow inherited from parent");
                            current = parent;
                        }
                        None => match self.policy.root_setting {
                            RootSettingPolicy::Reject => {
                                return Err(WorkflowError::InheritanceFromRoot {
                                    category: current,
                                });
                            }
                            RootSettingPolicy::FallBackToDefault => {
                                let id = self.workflows.default_workflow_id().await?;
                                debug!(%category, %current, workflow = %id, "root inheritance fell back to the default workflow");
                                return Ok(id);
                            }
                        },
                    }
                }
            }
        }
    }

    /// Resolve the initial stage that applies to a category
    ///
    /// This is the workflow resolved by [`Self::resolve_workflow_id`]
    /// followed by a lookup of that workflow's default stage.
    pub async fn resolve_initial_stage(&self, category: CategoryId) -> WorkflowResult<StageId> {
        let workflow = self.resolve_workflow_id(category).await?;
        let stage = self.stages.default_stage_id(workflow).await?;
        debug!(%category, %workflow, %stage, "resolved initial stage");
        Ok(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::memory::InMemoryWorkflowStore;
    use crate::workflow::{Stage, Workflow};

    fn resolver_for(store: &InMemoryWorkflowStore) -> WorkflowResolver {
        WorkflowResolver::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        )
    }

    async fn workflow_with_initial(store: &InMemoryWorkflowStore, id: u64, stage: u64) {
        let wf_id = WorkflowId::new(id);
        let mut wf = Workflow::new(wf_id, format!("Workflow {id}"));
        wf.add_stage(Stage::initial(StageId::new(stage), wf_id, "Unpublished"))
            .unwrap();
        store.insert_workflow(wf).await.unwrap();
    }

    #[tokio::test]
    async fn test_explicit_setting_resolves_directly() {
        let store = InMemoryWorkflowStore::new();
        workflow_with_initial(&store, 42, 7).await;
        store
            .insert_category(Category::root(
                CategoryId::new(1),
                WorkflowSetting::Explicit(WorkflowId::new(42)),
            ))
            .await
            .unwrap();

        let resolver = resolver_for(&store);
        assert_eq!(
            resolver
                .resolve_workflow_id(CategoryId::new(1))
                .await
                .unwrap(),
            WorkflowId::new(42)
        );
        assert_eq!(
            resolver
                .resolve_initial_stage(CategoryId::new(1))
                .await
                .unwrap(),
            StageId::new(7)
        );
    }

    #[tokio::test]
    async fn test_missing_category_fails() {
        let store = InMemoryWorkflowStore::new();
        let resolver = resolver_for(&store);
        let err = resolver
            .resolve_workflow_id(CategoryId::new(9))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::CategoryNotFound(_)));
    }

    #[tokio::test]
    async fn test_use_default_without_default_workflow_fails() {
        let store = InMemoryWorkflowStore::new();
        store
            .insert_category(Category::root(
                CategoryId::new(1),
                WorkflowSetting::UseDefault,
            ))
            .await
            .unwrap();

        let resolver = resolver_for(&store);
        let err = resolver
            .resolve_workflow_id(CategoryId::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NoDefaultWorkflow));
    }

    #[tokio::test]
    async fn test_depth_bound_trips_on_long_chains() {
        let store = InMemoryWorkflowStore::new();
        // 1 <- 2 <- ... <- 6, all inheriting, root never terminates the
        // walk because the policy bound is hit first
        store
            .insert_category(Category::root(
                CategoryId::new(1),
                WorkflowSetting::UseInherited,
            ))
            .await
            .unwrap();
        for id in 2..=6 {
            store
                .insert_category(Category::child(
                    CategoryId::new(id),
                    CategoryId::new(id - 1),
                    WorkflowSetting::UseInherited,
                ))
                .await
                .unwrap();
        }

        let resolver = WorkflowResolver::with_policy(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            ResolverPolicy {
                max_depth: 4,
                ..ResolverPolicy::default()
            },
        );
        let err = resolver
            .resolve_workflow_id(CategoryId::new(6))
            .await
            .unwrap_err();
        assert!(err.is_cycle());
    }

    #[tokio::test]
    async fn test_self_parent_is_a_cycle() {
        let store = InMemoryWorkflowStore::new();
        store
            .insert_category(Category::child(
                CategoryId::new(1),
                CategoryId::new(1),
                WorkflowSetting::UseInherited,
            ))
            .await
            .unwrap();

        let resolver = resolver_for(&store);
        let err = resolver
            .resolve_workflow_id(CategoryId::new(1))
            .await
            .unwrap_err();
        assert!(err.is_cycle());
    }

    #[test]
    fn test_policy_defaults() {
        let policy = ResolverPolicy::default();
        assert_eq!(policy.root_setting, RootSettingPolicy::Reject);
        assert_eq!(policy.max_depth, 64);
    }

    #[test]
    fn test_root_policy_serializes_snake_case() {
        let json = serde_json::to_string(&RootSettingPolicy::FallBackToDefault).unwrap();
        assert_eq!(json, "\"fall_back_to_default\"");
    }
}
