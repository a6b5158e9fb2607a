use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project name and timestamps. Travels with a snapshot so that re-saving a
/// loaded project keeps its identity and creation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    /// Time of the latest save.
    pub modified: DateTime<Utc>,
}

impl ProjectMetadata {
    /// A fresh project, created and modified now.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created: now,
            modified: now,
        }
    }

    /// Copy stamped with the current time as the modification date. Never
    /// earlier than `created`, even with a skewed clock.
    pub fn touched(&self) -> Self {
        Self {
            modified: Utc::now().max(self.created),
            ..self.clone()
        }
    }
}
