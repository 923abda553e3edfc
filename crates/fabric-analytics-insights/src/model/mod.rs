use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ACTIVE_STATE: &str = "Active";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_id: Option<String>,
}

impl Workspace {
    pub fn is_active(&self) -> bool {
        self.state == ACTIVE_STATE
    }

    /// An empty capacity reference counts as no capacity
    pub fn has_capacity(&self) -> bool {
        self.capacity_id.as_deref().is_some_and(|x| !x.is_empty())
    }
}

/// Item living in a workspace, addressed by workspace id and item id
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub workspace_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<DateTime<Utc>>,
}

pub type Pipeline = Item;
pub type Notebook = Item;
