// Copyright 2025 Cowboy AI, LLC.

//! # CIM Content Workflow
//!
//! Category-to-workflow resolution and initial-stage reset for content
//! approval workflows.
//!
//! Content items live in a category tree; every category is associated with
//! an approval/publication workflow in one of three ways:
//! - **Explicit**: the category names a workflow id
//! - **Use default**: the category defers to the site's default workflow
//! - **Use inherited**: the category defers to its parent, recursively,
//!   until a concrete id or the default is reached
//!
//! This crate provides:
//! - **WorkflowResolver**: walks the category ancestry, interpreting the
//!   stored setting at each level, and returns the workflow's initial stage
//! - **InitialStageReset**: sweeps the items of target categories, writing
//!   each item's stage association back to the resolved initial stage and
//!   reporting a per-item outcome list
//! - **Store traits**: five narrow interfaces over the external category,
//!   workflow, content, and association storage, plus an in-memory
//!   implementation for tests and embedding
//!
//! ## Design Principles
//!
//! 1. **Purity**: resolution is read-only, deterministic, and uncached; the
//!    same stored configuration always yields the same result
//! 2. **Bounded walks**: ancestry is resolved iteratively with a visited
//!    set and a depth bound, so malformed trees fail fast instead of
//!    hanging
//! 3. **Per-item isolation**: one item's failure never aborts a batch;
//!    every item gets its own reported outcome
//! 4. **Injected storage**: all storage access goes through constructor-
//!    injected traits, keeping the domain logic host-agnostic

#![warn(missing_docs)]

mod category;
mod errors;
mod identifiers;
mod memory;
mod reset;
mod resolver;
mod store;
mod workflow;

pub use category::{Category, CategoryParams, WorkflowSetting};
pub use errors::{WorkflowError, WorkflowResult};
pub use identifiers::{CategoryId, ExtensionType, ItemId, StageId, WorkflowId};
pub use memory::InMemoryWorkflowStore;
pub use reset::{
    CategoryFailure, FailureKind, InitialStageReset, ItemOutcome, ResetOutcome, ResetReport,
    TaskStatus,
};
pub use resolver::{ResolverPolicy, RootSettingPolicy, WorkflowResolver};
pub use store::{
    AssociationStore, CategoryStore, ContentItem, ContentItemSource, StageStore, WorkflowStore,
};
pub use workflow::{Stage, Workflow};
