//! Move Operation Types
//!
//! A plan is an ordered `Vec<MoveOperation>`. Each operation names one page, where
//! it was, where it must go, and a [`PlacementRef`] saying how to get it there
//! using only relative addressing (the backend has no absolute positions).

use serde::{Deserialize, Serialize};

/// How a page is positioned relative to its reference page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlacementMode {
    /// Append as last child of the reference page
    AppendToParent,
    /// Insert immediately before the reference sibling
    BeforeSibling,
    /// Insert immediately after the reference sibling
    AfterSibling,
}

impl PlacementMode {
    /// Position verb understood by the backend move endpoint.
    pub fn api_position(&self) -> &'static str {
        match self {
            PlacementMode::AppendToParent => "append",
            PlacementMode::BeforeSibling => "before",
            PlacementMode::AfterSibling => "after",
        }
    }
}

/// Relative placement directive for one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRef {
    pub mode: PlacementMode,
    pub reference_page_id: String,
}

impl PlacementRef {
    pub fn append_to(parent_id: impl Into<String>) -> Self {
        Self {
            mode: PlacementMode::AppendToParent,
            reference_page_id: parent_id.into(),
        }
    }

    pub fn before(sibling_id: impl Into<String>) -> Self {
        Self {
            mode: PlacementMode::BeforeSibling,
            reference_page_id: sibling_id.into(),
        }
    }

    pub fn after(sibling_id: impl Into<String>) -> Self {
        Self {
            mode: PlacementMode::AfterSibling,
            reference_page_id: sibling_id.into(),
        }
    }
}

/// Why a page appears in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveReason {
    /// The page gets a different parent
    ParentChange,
    /// Same parent, different sibling index
    Reorder,
}

impl MoveReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveReason::ParentChange => "parent-change",
            MoveReason::Reorder => "reorder",
        }
    }
}

/// One page's required relocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOperation {
    pub page_id: String,
    pub from_parent_id: Option<String>,
    pub to_parent_id: Option<String>,
    pub from_index: usize,
    pub to_index: usize,
    pub placement: PlacementRef,
    pub reason: MoveReason,
}

impl MoveOperation {
    pub fn is_parent_change(&self) -> bool {
        self.reason == MoveReason::ParentChange
    }
}
