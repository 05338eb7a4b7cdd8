//! Declarative access rules
//!
//! Destructive commands check a rule-set before acting. Evaluation is a pure
//! function over the rules; callers treat the result as an opaque yes/no and
//! never re-derive policy themselves.

use serde::{Deserialize, Serialize};

/// Actions a rule can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

/// A single grant: the named role may perform `actions` on `subjects`
///
/// Subjects are entity kind names ("customer", "proposal", ...); `"*"`
/// matches any subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRule {
    pub role: String,
    pub actions: Vec<Action>,
    pub subjects: Vec<String>,
}

/// Evaluate whether `role` may perform `action` on `subject`
///
/// Grants are additive: any matching rule allows the action. An empty
/// rule-set denies nothing - a project without access rules is unrestricted.
pub fn can_perform(action: Action, subject: &str, role: &str, rules: &[AccessRule]) -> bool {
    if rules.is_empty() {
        return true;
    }

    rules.iter().any(|rule| {
        rule.role == role
            && rule.actions.contains(&action)
            && rule
                .subjects
                .iter()
                .any(|s| s == "*" || s.eq_ignore_ascii_case(subject))
    })
}

/// Load the project's access rules from `.tiller/access.yaml`
///
/// A missing or unreadable file means no rules, i.e. unrestricted.
pub fn load_rules(project: &crate::core::project::Project) -> Vec<AccessRule> {
    let path = project.state_dir().join("access.yaml");
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Vec::new();
    };
    serde_yml::from_str(&content).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<AccessRule> {
        vec![
            AccessRule {
                role: "sales".to_string(),
                actions: vec![Action::View, Action::Create, Action::Edit],
                subjects: vec!["customer".to_string(), "proposal".to_string()],
            },
            AccessRule {
                role: "admin".to_string(),
                actions: vec![Action::View, Action::Create, Action::Edit, Action::Delete],
                subjects: vec!["*".to_string()],
            },
        ]
    }

    #[test]
    fn test_empty_rules_allow_everything() {
        assert!(can_perform(Action::Delete, "customer", "anyone", &[]));
    }

    #[test]
    fn test_grants_are_additive() {
        let rules = rules();
        assert!(can_perform(Action::Edit, "proposal", "sales", &rules));
        assert!(!can_perform(Action::Delete, "proposal", "sales", &rules));
        assert!(!can_perform(Action::View, "employee", "sales", &rules));
    }

    #[test]
    fn test_wildcard_subject() {
        let rules = rules();
        assert!(can_perform(Action::Delete, "employee", "admin", &rules));
        assert!(can_perform(Action::Delete, "task", "admin", &rules));
    }

    #[test]
    fn test_subject_match_is_case_insensitive() {
        let rules = rules();
        assert!(can_perform(Action::View, "Customer", "sales", &rules));
    }
}
