// Copyright 2025 Cowboy AI, LLC.

//! Category tree nodes and their workflow configuration
//!
//! A category either names its workflow outright or defers the decision:
//! to the site default, or to whatever its parent category resolves to.
//! The persisted form is a single `workflow_id` value inside the category's
//! JSON params blob, holding either an integer id (sometimes stored as a
//! numeric string) or one of the sentinels `"use_default"` /
//! `"use_inherited"`.

use crate::errors::{WorkflowError, WorkflowResult};
use crate::identifiers::{CategoryId, WorkflowId};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const USE_DEFAULT: &str = "use_default";
const USE_INHERITED: &str = "use_inherited";

/// How a category selects its workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowSetting {
    /// A concrete workflow id
    Explicit(WorkflowId),

    /// Use the site's default workflow
    UseDefault,

    /// Inherit the workflow from the parent category
    UseInherited,
}

impl fmt::Display for WorkflowSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowSetting::Explicit(id) => write!(f, "{id}"),
            WorkflowSetting::UseDefault => f.write_str(USE_DEFAULT),
            WorkflowSetting::UseInherited => f.write_str(USE_INHERITED),
        }
    }
}

impl FromStr for WorkflowSetting {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            USE_DEFAULT => Ok(WorkflowSetting::UseDefault),
            USE_INHERITED => Ok(WorkflowSetting::UseInherited),
            other => other
                .trim()
                .parse::<u64>()
                .map(|id| WorkflowSetting::Explicit(WorkflowId::new(id)))
                .map_err(|_| WorkflowError::InvalidSetting {
                    value: s.to_string(),
                }),
        }
    }
}

impl Serialize for WorkflowSetting {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            WorkflowSetting::Explicit(id) => serializer.serialize_u64(id.as_u64()),
            WorkflowSetting::UseDefault => serializer.serialize_str(USE_DEFAULT),
            WorkflowSetting::UseInherited => serializer.serialize_str(USE_INHERITED),
        }
    }
}

impl<'de> Deserialize<'de> for WorkflowSetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SettingVisitor;

        impl Visitor<'_> for SettingVisitor {
            type Value = WorkflowSetting;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer workflow id, \"use_default\", or \"use_inherited\"")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(WorkflowSetting::Explicit(WorkflowId::new(v)))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v)
                    .map(|id| WorkflowSetting::Explicit(WorkflowId::new(id)))
                    .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse()
                    .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(SettingVisitor)
    }
}

/// A node in the category tree
///
/// Categories are long-lived, created and edited by administrators outside
/// this library's control; this library only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier of this category
    pub id: CategoryId,

    /// Parent category, if any; root categories have none
    pub parent_id: Option<CategoryId>,

    /// How this category selects its workflow
    pub workflow_setting: WorkflowSetting,
}

impl Category {
    /// Create a root category (no parent)
    pub fn root(id: CategoryId, workflow_setting: WorkflowSetting) -> Self {
        Self {
            id,
            parent_id: None,
            workflow_setting,
        }
    }

    /// Create a child category under a parent
    pub fn child(id: CategoryId, parent_id: CategoryId, workflow_setting: WorkflowSetting) -> Self {
        Self {
            id,
            parent_id: Some(parent_id),
            workflow_setting,
        }
    }

    /// Whether this category is a root of the tree
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// The configuration blob stored with a category row
///
/// Only the `workflow_id` key matters here; administrators store many other
/// keys in the same blob and those are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryParams {
    /// The persisted workflow setting, absent if never configured
    #[serde(default)]
    pub workflow_id: Option<WorkflowSetting>,
}

impl CategoryParams {
    /// Parse a raw category params blob
    pub fn parse(raw: &str) -> WorkflowResult<Self> {
        serde_json::from_str(raw).map_err(|e| WorkflowError::InvalidSetting {
            value: e.to_string(),
        })
    }

    /// The workflow setting, failing if the blob never configured one
    pub fn workflow_setting(&self) -> WorkflowResult<WorkflowSetting> {
        self.workflow_id.ok_or(WorkflowError::InvalidSetting {
            value: "workflow_id missing from category params".to_string(),
        })
    }
}
