//! Proposal entity type - quotes sent to customers

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Currency, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::grid::{Row, Value};

/// Proposal lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStage {
    #[default]
    Draft,
    Sent,
    Accepted,
    Declined,
    Expired,
}

impl ProposalStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStage::Draft => "draft",
            ProposalStage::Sent => "sent",
            ProposalStage::Accepted => "accepted",
            ProposalStage::Declined => "declined",
            ProposalStage::Expired => "expired",
        }
    }
}

impl std::fmt::Display for ProposalStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A Proposal entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique identifier
    pub id: EntityId,

    /// Proposal title
    pub title: String,

    /// Customer this proposal was prepared for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<EntityId>,

    /// Total value
    #[serde(default)]
    pub amount: f64,

    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub stage: ProposalStage,

    /// Offer expiry date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,

    /// Owner (employee name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created: DateTime<Utc>,

    pub author: String,
}

impl Entity for Proposal {
    const PREFIX: EntityPrefix = EntityPrefix::Prop;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
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

impl Proposal {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Prop),
            title: title.into(),
            customer: None,
            amount: 0.0,
            currency: Currency::default(),
            stage: ProposalStage::default(),
            valid_until: None,
            owner: None,
            tags: Vec::new(),
            notes: None,
            created: Utc::now(),
            author: author.into(),
        }
    }

    /// Whether the offer has passed its expiry date
    pub fn is_expired_as_of(&self, today: NaiveDate) -> bool {
        self.valid_until.is_some_and(|d| d < today)
    }
}

impl Row for Proposal {
    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Text(self.id.to_string()),
            "title" => Value::from(self.title.as_str()),
            "customer" => Value::from(self.customer.as_ref().map(|c| c.to_string())),
            "amount" => Value::Number(self.amount),
            "currency" => Value::from(self.currency.to_string()),
            "stage" => Value::from(self.stage.as_str()),
            "valid_until" => super::date_value(self.valid_until),
            "owner" => Value::from(self.owner.clone()),
            "tags" => super::tags_value(&self.tags),
            "created" => Value::Date(self.created),
            "author" => Value::from(self.author.as_str()),
            _ => Value::Null,
        }
    }
}
