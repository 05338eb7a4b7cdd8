//! Declarative row filtering and free-text search
//!
//! Filters are data, not closures: each entry names a field and a constraint,
//! entries are ANDed, and the whole set can be counted, displayed and reset by
//! the view state without inspecting predicates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::grid::record::{Row, Value};

/// A constraint applied to one field
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Strict equality with a single value
    Equals(Value),
    /// Set membership; an empty set matches nothing
    OneOf(Vec<Value>),
    /// Numeric range, either bound optional, bounds inclusive
    NumberRange { min: Option<f64>, max: Option<f64> },
    /// Date range, either bound optional, bounds inclusive at both ends
    DateRange {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
    /// Truthiness of the field must equal the flag
    Flag(bool),
}

impl Filter {
    /// Whether this entry constrains anything
    ///
    /// Null/empty-text equality and unbounded ranges are placeholders left
    /// behind by cleared UI inputs; they are skipped during matching and do
    /// not count as active. An empty `OneOf` IS active: membership in the
    /// empty set rejects every row.
    pub fn is_active(&self) -> bool {
        match self {
            Filter::Equals(Value::Null) => false,
            Filter::Equals(Value::Text(s)) => !s.is_empty(),
            Filter::NumberRange {
                min: None,
                max: None,
            } => false,
            Filter::DateRange {
                from: None,
                to: None,
            } => false,
            _ => true,
        }
    }

    /// Whether `value` satisfies this constraint
    ///
    /// Range filters are fail-open: a value that cannot be coerced passes
    /// rather than hiding the row behind a filter it cannot evaluate.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Filter::Equals(expected) => value == expected,
            Filter::OneOf(allowed) => allowed.contains(value),
            Filter::NumberRange { min, max } => match value.as_number() {
                None => true,
                Some(x) => {
                    min.map_or(true, |lo| x >= lo) && max.map_or(true, |hi| x <= hi)
                }
            },
            Filter::DateRange { from, to } => match value.as_date() {
                None => true,
                Some(d) => {
                    from.map_or(true, |lo| d >= lo) && to.map_or(true, |hi| d <= hi)
                }
            },
            Filter::Flag(expected) => value.truthy() == *expected,
        }
    }
}

/// An ordered set of per-field constraints, ANDed together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    entries: BTreeMap<String, Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the constraint for a field
    pub fn set(&mut self, field: impl Into<String>, filter: Filter) {
        self.entries.insert(field.into(), filter);
    }

    /// Remove the constraint for a field
    pub fn remove(&mut self, field: &str) -> Option<Filter> {
        self.entries.remove(field)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, field: &str) -> Option<&Filter> {
        self.entries.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that actually constrain something
    ///
    /// This is what a filter badge displays; committed search text is counted
    /// separately by the view state.
    pub fn active_count(&self) -> usize {
        self.entries.values().filter(|f| f.is_active()).count()
    }
}

impl FromIterator<(String, Filter)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (String, Filter)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Apply search plus filters to `rows`, returning surviving source indices
///
/// Pure and order-preserving: the result is a subsequence of `0..rows.len()`.
/// Search keeps a row when ANY of `search_fields` renders to a string that
/// contains the lowercased needle; empty search text or an empty field list
/// disables search entirely.
pub fn filter_rows<R: Row, S: AsRef<str>>(
    rows: &[R],
    search: &str,
    search_fields: &[S],
    filters: &FilterSet,
) -> Vec<usize> {
    let needle = search.trim().to_lowercase();
    let search_enabled = !needle.is_empty() && !search_fields.is_empty();

    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            if search_enabled {
                let hit = search_fields.iter().any(|field| {
                    row.field(field.as_ref())
                        .render()
                        .to_lowercase()
                        .contains(&needle)
                });
                if !hit {
                    return false;
                }
            }

            filters
                .iter()
                .filter(|(_, f)| f.is_active())
                .all(|(field, f)| f.matches(&row.field(field)))
        })
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn person(name: &str, age: Option<f64>) -> BTreeMap<String, Value> {
        let mut row = BTreeMap::new();
        row.insert("name".to_string(), Value::from(name));
        row.insert("age".to_string(), Value::from(age));
        row
    }

    fn sample() -> Vec<BTreeMap<String, Value>> {
        vec![
            person("Bob", Some(30.0)),
            person("ann", Some(25.0)),
            person("Cara", None),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let rows = sample();
        let kept = filter_rows(&rows, "bo", &["name"], &FilterSet::new());
        assert_eq!(kept, vec![0]);
    }

    #[test]
    fn test_search_ignored_without_fields() {
        let rows = sample();
        let none: [&str; 0] = [];
        let kept = filter_rows(&rows, "bo", &none, &FilterSet::new());
        assert_eq!(kept, vec![0, 1, 2]);
    }

    #[test]
    fn test_null_never_matches_search() {
        let rows = sample();
        // Cara's age is Null; searching the age field must not surface her
        let kept = filter_rows(&rows, "2", &["age"], &FilterSet::new());
        assert_eq!(kept, vec![1]);
    }

    #[test]
    fn test_number_range_is_fail_open() {
        let rows = sample();
        let mut filters = FilterSet::new();
        filters.set(
            "age",
            Filter::NumberRange {
                min: Some(26.0),
                max: None,
            },
        );

        // Bob passes (30 >= 26), ann fails (25 < 26), Cara passes (age unset)
        let kept = filter_rows(&rows, "", &["name"], &filters);
        assert_eq!(kept, vec![0, 2]);
    }

    #[test]
    fn test_date_range_inclusive_both_ends() {
        let day = |s: &str| Value::Text(s.to_string()).as_date().unwrap();
        let f = Filter::DateRange {
            from: Some(day("2026-01-10")),
            to: Some(day("2026-01-20")),
        };

        assert!(f.matches(&Value::Date(day("2026-01-10"))));
        assert!(f.matches(&Value::Date(day("2026-01-20"))));
        assert!(!f.matches(&Value::Date(day("2026-01-21"))));
        // Uncoercible date passes
        assert!(f.matches(&Value::Text("next week".into())));
    }

    #[test]
    fn test_entries_are_anded() {
        let rows = sample();
        let mut filters = FilterSet::new();
        filters.set("name", Filter::Equals(Value::from("Bob")));
        filters.set(
            "age",
            Filter::NumberRange {
                min: Some(40.0),
                max: None,
            },
        );

        let kept = filter_rows(&rows, "", &["name"], &filters);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_one_of_membership() {
        let rows = sample();
        let mut filters = FilterSet::new();
        filters.set(
            "name",
            Filter::OneOf(vec![Value::from("ann"), Value::from("Cara")]),
        );
        let kept = filter_rows(&rows, "", &["name"], &filters);
        assert_eq!(kept, vec![1, 2]);

        // Empty membership set is active and rejects everything
        filters.set("name", Filter::OneOf(Vec::new()));
        assert!(filter_rows(&rows, "", &["name"], &filters).is_empty());
    }

    #[test]
    fn test_flag_filter_uses_truthiness() {
        let mut row = BTreeMap::new();
        row.insert("done".to_string(), Value::Bool(false));
        let rows = vec![row];

        let mut filters = FilterSet::new();
        filters.set("done", Filter::Flag(false));
        assert_eq!(filter_rows(&rows, "", &["done"], &filters), vec![0]);

        filters.set("done", Filter::Flag(true));
        assert!(filter_rows(&rows, "", &["done"], &filters).is_empty());
    }

    #[test]
    fn test_inactive_entries_do_not_count_or_constrain() {
        let rows = sample();
        let mut filters = FilterSet::new();
        filters.set("name", Filter::Equals(Value::Text(String::new())));
        filters.set(
            "age",
            Filter::NumberRange {
                min: None,
                max: None,
            },
        );

        assert_eq!(filters.active_count(), 0);
        assert_eq!(filter_rows(&rows, "", &["name"], &filters).len(), 3);

        filters.set("name", Filter::Equals(Value::from("Bob")));
        assert_eq!(filters.active_count(), 1);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let rows = sample();
        let mut filters = FilterSet::new();
        filters.set(
            "age",
            Filter::NumberRange {
                min: Some(20.0),
                max: Some(40.0),
            },
        );

        let once = filter_rows(&rows, "a", &["name"], &filters);
        let survivors: Vec<_> = once.iter().map(|&i| rows[i].clone()).collect();
        let twice = filter_rows(&survivors, "a", &["name"], &filters);

        // Re-applying the same constraints to the survivors keeps them all
        assert_eq!(twice.len(), once.len());
        assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
    }
}
