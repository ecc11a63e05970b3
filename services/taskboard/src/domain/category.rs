//! Category 实体（软删除）

use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use taskboard_common::Patch;
use taskboard_domain_core::{Entity, SoftDeletable};
use taskboard_ports::Persistable;
use utoipa::ToSchema;

/// Category ID
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

/// Category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Patch<String>,
    pub description: Patch<String>,
}

impl CategoryPatch {
    pub fn apply(self, category: &mut Category) -> bool {
        let mut changed = self.name.apply_to(&mut category.name);
        changed |= self.description.apply_to_option(&mut category.description);
        changed
    }
}

impl Entity for Category {
    type Id = CategoryId;
    const NAME: &'static str = "Category";

    fn id(&self) -> CategoryId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl SoftDeletable for Category {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }
}

impl Persistable for Category {
    type Draft = NewCategory;
    type Filter = ();

    fn from_draft(id: CategoryId, draft: NewCategory, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn is_live(&self) -> bool {
        !self.is_deleted()
    }
}
