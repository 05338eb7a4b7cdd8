//! Engagement entity type - delivery work for a customer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::grid::{Row, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngagementKind {
    #[default]
    Onboarding,
    Consulting,
    Support,
    Training,
}

impl EngagementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementKind::Onboarding => "onboarding",
            EngagementKind::Consulting => "consulting",
            EngagementKind::Support => "support",
            EngagementKind::Training => "training",
        }
    }
}

impl std::fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngagementStatus {
    #[default]
    Planned,
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl EngagementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementStatus::Planned => "planned",
            EngagementStatus::Active => "active",
            EngagementStatus::Paused => "paused",
            EngagementStatus::Completed => "completed",
            EngagementStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for EngagementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An Engagement entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engagement {
    pub id: EntityId,

    pub title: String,

    /// Customer the work is delivered for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<EntityId>,

    #[serde(default)]
    pub kind: EngagementKind,

    #[serde(default)]
    pub status: EngagementStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Whether hours on this engagement are invoiced
    #[serde(default)]
    pub billable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub created: DateTime<Utc>,

    pub author: String,
}

impl Entity for Engagement {
    const PREFIX: EntityPrefix = EntityPrefix::Eng;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn status(&self) -> &'static str {
        self.status.as_str()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Engagement {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Eng),
            title: title.into(),
            customer: None,
            kind: EngagementKind::default(),
            status: EngagementStatus::default(),
            start_date: None,
            end_date: None,
            billable: false,
            owner: None,
            tags: Vec::new(),
            created: Utc::now(),
            author: author.into(),
        }
    }
}

impl Row for Engagement {
    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Text(self.id.to_string()),
            "title" => Value::from(self.title.as_str()),
            "customer" => Value::from(self.customer.as_ref().map(|c| c.to_string())),
            "kind" => Value::from(self.kind.as_str()),
            "status" => Value::from(self.status.as_str()),
            "start_date" => super::date_value(self.start_date),
            "end_date" => super::date_value(self.end_date),
            "billable" => Value::Bool(self.billable),
            "owner" => Value::from(self.owner.clone()),
            "tags" => super::tags_value(&self.tags),
            "created" => Value::Date(self.created),
            "author" => Value::from(self.author.as_str()),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engagement_creation() {
        let eng = Engagement::new("Acme onboarding", "test");
        assert!(eng.id.to_string().starts_with("ENG-"));
        assert_eq!(eng.status(), "planned");
        assert!(!eng.billable);
    }

    #[test]
    fn test_engagement_yaml_roundtrip() {
        let mut eng = Engagement::new("Acme onboarding", "test");
        eng.kind = EngagementKind::Training;
        eng.status = EngagementStatus::Active;
        eng.billable = true;
        eng.start_date = NaiveDate::from_ymd_opt(2026, 2, 1);

        let yaml = serde_yml::to_string(&eng).unwrap();
        let parsed: Engagement = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.kind, EngagementKind::Training);
        assert_eq!(parsed.status, EngagementStatus::Active);
        assert!(parsed.billable);
        assert_eq!(parsed.start_date, eng.start_date);
    }
}
