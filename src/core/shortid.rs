//! Short ID aliases for easier record selection
//!
//! Full record IDs are 30+ characters; short IDs map `CUST@1`, `PROP@3` (and
//! session-local `@N`) to full IDs so users can reference list results without
//! copying ULIDs. Prefixed aliases are persisted in `.tiller/shortids.json`
//! and assigned in first-seen order as records are listed.

use std::collections::HashMap;
use std::fs;

use crate::core::identity::EntityId;
use crate::core::project::Project;

/// Index file location within a project
const INDEX_FILE: &str = "shortids.json";

/// A mapping of short aliases to full record IDs
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ShortIdIndex {
    /// Maps "PREFIX@N" to full record ID (e.g. "CUST@1" -> "CUST-01ABC...")
    entries: HashMap<String, String>,
    /// Next alias number per prefix
    next_ids: HashMap<String, u32>,
    /// Full record ID -> "PREFIX@N" (rebuilt on load)
    #[serde(skip)]
    reverse: HashMap<String, String>,
    /// Session-local list positions: N -> full record ID
    #[serde(skip)]
    session: Vec<String>,
}

impl ShortIdIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index from a project, or create empty if not found
    pub fn load(project: &Project) -> Self {
        let path = project.state_dir().join(INDEX_FILE);
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::new();
        };
        match serde_json::from_str::<ShortIdIndex>(&content) {
            Ok(mut index) => {
                index.reverse = index
                    .entries
                    .iter()
                    .map(|(alias, id)| (id.clone(), alias.clone()))
                    .collect();
                index
            }
            Err(_) => Self::new(),
        }
    }

    /// Save the index to a project
    pub fn save(&self, project: &Project) -> std::io::Result<()> {
        let path = project.state_dir().join(INDEX_FILE);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
    }

    /// Record a listed ID: assigns a persistent prefixed alias on first sight
    /// and appends to the session-local positions. Returns the session number.
    pub fn record(&mut self, id: &EntityId) -> u32 {
        let id_str = id.to_string();

        if !self.reverse.contains_key(&id_str) {
            let prefix = id.prefix().as_str();
            let next = self.next_ids.entry(prefix.to_string()).or_insert(1);
            let alias = format!("{}@{}", prefix, next);
            *next += 1;
            self.entries.insert(alias.clone(), id_str.clone());
            self.reverse.insert(id_str.clone(), alias);
        }

        if let Some(pos) = self.session.iter().position(|s| s == &id_str) {
            (pos + 1) as u32
        } else {
            self.session.push(id_str);
            self.session.len() as u32
        }
    }

    /// Resolve a reference to a full record ID
    ///
    /// Accepts `PREFIX@N` (persistent), `@N` or a bare number (session-local),
    /// or a full/partial record ID which passes through unchanged.
    pub fn resolve(&self, reference: &str) -> Option<String> {
        if let Some((prefix, _)) = reference.split_once('@') {
            if !prefix.is_empty() {
                return self.entries.get(&reference.to_ascii_uppercase()).cloned();
            }
        }

        let num_str = match reference.strip_prefix('@') {
            Some(rest) => rest,
            None if reference.chars().all(|c| c.is_ascii_digit()) => reference,
            None => return Some(reference.to_string()),
        };

        num_str
            .parse::<usize>()
            .ok()
            .filter(|&n| n >= 1)
            .and_then(|n| self.session.get(n - 1).cloned())
    }

    /// The persistent prefixed alias for a full record ID, if assigned
    pub fn alias_for(&self, id: &EntityId) -> Option<&str> {
        self.reverse.get(&id.to_string()).map(|s| s.as_str())
    }

    /// Number of persistent aliases
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index has no persistent aliases
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve a reference against the project's persisted index
pub fn parse_entity_reference(reference: &str, project: &Project) -> String {
    let index = ShortIdIndex::load(project);
    index
        .resolve(reference)
        .unwrap_or_else(|| reference.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;

    #[test]
    fn test_record_assigns_sequential_aliases() {
        let mut index = ShortIdIndex::new();
        let a = EntityId::new(EntityPrefix::Cust);
        let b = EntityId::new(EntityPrefix::Cust);
        let c = EntityId::new(EntityPrefix::Prop);

        assert_eq!(index.record(&a), 1);
        assert_eq!(index.record(&b), 2);
        assert_eq!(index.record(&c), 3);

        assert_eq!(index.alias_for(&a), Some("CUST@1"));
        assert_eq!(index.alias_for(&b), Some("CUST@2"));
        assert_eq!(index.alias_for(&c), Some("PROP@1"));
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut index = ShortIdIndex::new();
        let id = EntityId::new(EntityPrefix::Task);

        let first = index.record(&id);
        let again = index.record(&id);
        assert_eq!(first, again);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_resolve_prefixed_and_session() {
        let mut index = ShortIdIndex::new();
        let a = EntityId::new(EntityPrefix::Cust);
        let b = EntityId::new(EntityPrefix::Emp);
        index.record(&a);
        index.record(&b);

        assert_eq!(index.resolve("CUST@1"), Some(a.to_string()));
        assert_eq!(index.resolve("cust@1"), Some(a.to_string()));
        assert_eq!(index.resolve("EMP@1"), Some(b.to_string()));
        assert_eq!(index.resolve("@2"), Some(b.to_string()));
        assert_eq!(index.resolve("2"), Some(b.to_string()));
        assert_eq!(index.resolve("@99"), None);
        assert_eq!(index.resolve("CUST@99"), None);
    }

    #[test]
    fn test_resolve_passthrough() {
        let index = ShortIdIndex::new();
        assert_eq!(
            index.resolve("CUST-01ABC"),
            Some("CUST-01ABC".to_string())
        );
        assert_eq!(index.resolve("acme"), Some("acme".to_string()));
    }

    #[test]
    fn test_save_and_load_preserves_aliases() {
        let tmp = tempfile::tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        let id = EntityId::new(EntityPrefix::Part);
        let mut index = ShortIdIndex::new();
        index.record(&id);
        index.save(&project).unwrap();

        let loaded = ShortIdIndex::load(&project);
        assert_eq!(loaded.resolve("PART@1"), Some(id.to_string()));
        assert_eq!(loaded.alias_for(&id), Some("PART@1"));
    }
}
