//! Tag 实体（软删除）

use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use taskboard_common::Patch;
use taskboard_domain_core::{Entity, SoftDeletable};
use taskboard_ports::Persistable;
use utoipa::ToSchema;

/// Tag ID
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
pub struct TagId(pub i64);

/// Tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// 十六进制颜色，如 `#FF5733`
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    pub name: Patch<String>,
    pub color: Patch<String>,
}

impl TagPatch {
    pub fn apply(self, tag: &mut Tag) -> bool {
        let mut changed = self.name.apply_to(&mut tag.name);
        changed |= self.color.apply_to_option(&mut tag.color);
        changed
    }
}

impl Entity for Tag {
    type Id = TagId;
    const NAME: &'static str = "Tag";

    fn id(&self) -> TagId {
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

impl SoftDeletable for Tag {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }
}

impl Persistable for Tag {
    type Draft = NewTag;
    type Filter = ();

    fn from_draft(id: TagId, draft: NewTag, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            color: draft.color,
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
