// Copyright 2025 Cowboy AI, LLC.

//! Identifier types for categories, workflows, stages, and content items
//!
//! All four are keyed by integer database ids in the backing store, so the
//! wrappers are thin `u64` newtypes that serialize as plain numbers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category ID - identifies a node in the category tree
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct CategoryId(u64);

impl CategoryId {
    /// Create from a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CategoryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<CategoryId> for u64 {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

/// Workflow ID - identifies an approval/publication workflow
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct WorkflowId(u64);

impl WorkflowId {
    /// Create from a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for WorkflowId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<WorkflowId> for u64 {
    fn from(id: WorkflowId) -> Self {
        id.0
    }
}

/// Stage ID - identifies one step within a workflow
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct StageId(u64);

impl StageId {
    /// Create from a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StageId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<StageId> for u64 {
    fn from(id: StageId) -> Self {
        id.0
    }
}

/// Item ID - identifies a content item owned by the content subsystem
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct ItemId(u64);

impl ItemId {
    /// Create from a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Extension type - names the content subsystem an item belongs to
///
/// The stage association table is shared by several content subsystems, so
/// every row is keyed by `(item, extension)`. Articles use
/// `com_content.article`, which is also the [`Default`] here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ExtensionType(String);

impl ExtensionType {
    /// Create from an extension name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The article extension of the content subsystem
    pub fn article() -> Self {
        Self("com_content.article".to_string())
    }

    /// Get the underlying name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ExtensionType {
    fn default() -> Self {
        Self::article()
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ExtensionType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for ExtensionType {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}
