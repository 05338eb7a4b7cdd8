//! Partner entity type - organizations we sell with or through

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::grid::{Row, Value};

/// Partnership model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PartnerKind {
    #[default]
    Reseller,
    Referral,
    Technology,
    Integrator,
}

impl PartnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerKind::Reseller => "reseller",
            PartnerKind::Referral => "referral",
            PartnerKind::Technology => "technology",
            PartnerKind::Integrator => "integrator",
        }
    }
}

impl std::fmt::Display for PartnerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A Partner entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub id: EntityId,

    /// Organization name
    pub name: String,

    #[serde(default)]
    pub kind: PartnerKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Whether the partnership is currently active
    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created: DateTime<Utc>,

    pub author: String,
}

fn default_active() -> bool {
    true
}

impl Entity for Partner {
    const PREFIX: EntityPrefix = EntityPrefix::Part;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &'static str {
        if self.active {
            "active"
        } else {
            "inactive"
        }
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Partner {
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Part),
            name: name.into(),
            kind: PartnerKind::default(),
            region: None,
            contact_email: None,
            website: None,
            active: true,
            tags: Vec::new(),
            notes: None,
            created: Utc::now(),
            author: author.into(),
        }
    }
}

impl Row for Partner {
    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Text(self.id.to_string()),
            "name" => Value::from(self.name.as_str()),
            "kind" => Value::from(self.kind.as_str()),
            "region" => Value::from(self.region.clone()),
            "contact_email" => Value::from(self.contact_email.clone()),
            "website" => Value::from(self.website.clone()),
            "active" => Value::Bool(self.active),
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
    fn test_partner_defaults_active() {
        let partner = Partner::new("Northwind", "test");
        assert!(partner.active);
        assert_eq!(partner.status(), "active");
        assert_eq!(partner.kind, PartnerKind::Reseller);
    }

    #[test]
    fn test_partner_yaml_roundtrip() {
        let mut partner = Partner::new("Northwind", "test");
        partner.kind = PartnerKind::Technology;
        partner.active = false;

        let yaml = serde_yml::to_string(&partner).unwrap();
        let parsed: Partner = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.kind, PartnerKind::Technology);
        assert!(!parsed.active);
    }

    #[test]
    fn test_active_field_is_boolean() {
        let partner = Partner::new("Northwind", "test");
        assert_eq!(partner.field("active"), Value::Bool(true));
    }
}
