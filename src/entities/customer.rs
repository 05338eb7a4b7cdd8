//! Customer entity type - accounts in the sales pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Currency, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::grid::{Row, Value};

/// Where an account sits in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Lead,
    Prospect,
    Active,
    Churned,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Lead => "lead",
            Stage::Prospect => "prospect",
            Stage::Active => "active",
            Stage::Churned => "churned",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A Customer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: EntityId,

    /// Account name
    pub name: String,

    /// Primary contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Primary contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Website URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Pipeline stage
    #[serde(default)]
    pub stage: Stage,

    /// Account owner (employee name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Expected annual revenue from this account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<f64>,

    /// Currency for monetary fields
    #[serde(default)]
    pub currency: Currency,

    /// Sales region
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Tags for filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this record)
    pub author: String,
}

impl Entity for Customer {
    const PREFIX: EntityPrefix = EntityPrefix::Cust;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &'static str {
        self.stage.as_str()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Customer {
    /// Create a new customer in the default (lead) stage
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Cust),
            name: name.into(),
            email: None,
            phone: None,
            website: None,
            stage: Stage::default(),
            owner: None,
            annual_revenue: None,
            currency: Currency::default(),
            region: None,
            tags: Vec::new(),
            notes: None,
            created: Utc::now(),
            author: author.into(),
        }
    }
}

impl Row for Customer {
    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Text(self.id.to_string()),
            "name" => Value::from(self.name.as_str()),
            "email" => Value::from(self.email.clone()),
            "phone" => Value::from(self.phone.clone()),
            "website" => Value::from(self.website.clone()),
            "stage" => Value::from(self.stage.as_str()),
            "owner" => Value::from(self.owner.clone()),
            "annual_revenue" => Value::from(self.annual_revenue),
            "currency" => Value::from(self.currency.to_string()),
            "region" => Value::from(self.region.clone()),
            "tags" => super::tags_value(&self.tags),
            "notes" => Value::from(self.notes.clone()),
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
    fn test_customer_creation() {
        let customer = Customer::new("Acme Corp", "test");

        assert!(customer.id.to_string().starts_with("CUST-"));
        assert_eq!(customer.name, "Acme Corp");
        assert_eq!(customer.stage, Stage::Lead);
        assert_eq!(customer.status(), "lead");
    }

    #[test]
    fn test_customer_yaml_roundtrip() {
        let mut customer = Customer::new("Acme Corp", "test");
        customer.email = Some("sales@acme.example".to_string());
        customer.stage = Stage::Active;
        customer.annual_revenue = Some(125_000.0);
        customer.tags.push("enterprise".to_string());

        let yaml = serde_yml::to_string(&customer).unwrap();
        let parsed: Customer = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.id, customer.id);
        assert_eq!(parsed.stage, Stage::Active);
        assert_eq!(parsed.annual_revenue, Some(125_000.0));
        assert_eq!(parsed.tags, vec!["enterprise"]);
    }

    #[test]
    fn test_row_fields() {
        let mut customer = Customer::new("Acme Corp", "test");
        customer.annual_revenue = Some(50_000.0);

        assert_eq!(customer.field("name"), Value::Text("Acme Corp".into()));
        assert_eq!(customer.field("annual_revenue"), Value::Number(50_000.0));
        assert_eq!(customer.field("owner"), Value::Null);
        assert_eq!(customer.field("nonsense"), Value::Null);
    }
}
