//! Employee entity type - the internal team

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::grid::{Row, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeRole {
    #[default]
    Sales,
    Delivery,
    Support,
    Management,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRole::Sales => "sales",
            EmployeeRole::Delivery => "delivery",
            EmployeeRole::Support => "support",
            EmployeeRole::Management => "management",
        }
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An Employee entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EntityId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub role: EmployeeRole,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hired: Option<NaiveDate>,

    #[serde(default = "default_active")]
    pub active: bool,

    pub created: DateTime<Utc>,

    pub author: String,
}

fn default_active() -> bool {
    true
}

impl Entity for Employee {
    const PREFIX: EntityPrefix = EntityPrefix::Emp;

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

impl Employee {
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Emp),
            name: name.into(),
            email: None,
            role: EmployeeRole::default(),
            department: None,
            hired: None,
            active: true,
            created: Utc::now(),
            author: author.into(),
        }
    }
}

impl Row for Employee {
    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Text(self.id.to_string()),
            "name" => Value::from(self.name.as_str()),
            "email" => Value::from(self.email.clone()),
            "role" => Value::from(self.role.as_str()),
            "department" => Value::from(self.department.clone()),
            "hired" => super::date_value(self.hired),
            "active" => Value::Bool(self.active),
            "created" => Value::Date(self.created),
            "author" => Value::from(self.author.as_str()),
            _ => Value::Null,
        }
    }
}
