//! Stable, type-aware row ordering

use std::cmp::Ordering;

use crate::grid::record::{Row, Value};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Ascending => write!(f, "asc"),
            Direction::Descending => write!(f, "desc"),
        }
    }
}

/// An active sort: which field, which way
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub direction: Direction,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

/// Compare two non-null values by type
///
/// Matching types compare natively (text case-insensitively, dates by epoch
/// millis); mismatched types fall back to comparing rendered strings.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Value::Date(x), Value::Date(y)) => x.timestamp_millis().cmp(&y.timestamp_millis()),
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => a.render().to_lowercase().cmp(&b.render().to_lowercase()),
    }
}

/// Reorder `order` by the given spec; `None` preserves the input order
///
/// The sort is stable, so rows with equal keys keep their relative order and
/// pagination stays deterministic across recomputes. Null values sink to the
/// end in BOTH directions; descending only reverses the non-null ordering.
pub fn sort_rows<R: Row>(rows: &[R], order: &[usize], spec: Option<&SortSpec>) -> Vec<usize> {
    let mut sorted = order.to_vec();
    let Some(spec) = spec else {
        return sorted;
    };

    sorted.sort_by(|&ia, &ib| {
        let a = rows[ia].field(&spec.field);
        let b = rows[ib].field(&spec.field);
        match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = compare_values(&a, &b);
                match spec.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            }
        }
    });
    sorted
}

/// Tri-state header-click cycle: none/other field -> asc -> desc -> none
pub fn cycle(current: Option<&SortSpec>, field: &str) -> Option<SortSpec> {
    match current {
        Some(spec) if spec.field == field => match spec.direction {
            Direction::Ascending => Some(SortSpec::desc(field)),
            Direction::Descending => None,
        },
        _ => Some(SortSpec::asc(field)),
    }
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

    fn identity(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let rows = sample();
        let order = sort_rows(&rows, &identity(3), Some(&SortSpec::asc("name")));
        // ann < Bob < Cara despite the lowercase 'a'
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_nulls_sink_in_both_directions() {
        let rows = sample();

        let asc = sort_rows(&rows, &identity(3), Some(&SortSpec::asc("age")));
        assert_eq!(asc, vec![1, 0, 2]); // 25, 30, unset

        let desc = sort_rows(&rows, &identity(3), Some(&SortSpec::desc("age")));
        assert_eq!(desc, vec![0, 1, 2]); // 30, 25, unset - null still last
    }

    #[test]
    fn test_none_spec_is_identity() {
        let rows = sample();
        let order = vec![2, 0, 1];
        assert_eq!(sort_rows(&rows, &order, None), order);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let rows = vec![
            person("dup", Some(1.0)),
            person("dup", Some(2.0)),
            person("dup", Some(3.0)),
        ];

        for spec in [SortSpec::asc("name"), SortSpec::desc("name")] {
            let order = sort_rows(&rows, &identity(3), Some(&spec));
            assert_eq!(order, vec![0, 1, 2], "direction {}", spec.direction);
        }
    }

    #[test]
    fn test_mixed_types_compare_as_strings() {
        let mut a = BTreeMap::new();
        a.insert("v".to_string(), Value::from("10"));
        let mut b = BTreeMap::new();
        b.insert("v".to_string(), Value::Number(9.0));
        let rows = vec![a, b];

        // "10" < "9" lexicographically
        let order = sort_rows(&rows, &identity(2), Some(&SortSpec::asc("v")));
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_cycle_transitions() {
        let asc = cycle(None, "name").unwrap();
        assert_eq!(asc, SortSpec::asc("name"));

        let desc = cycle(Some(&asc), "name").unwrap();
        assert_eq!(desc, SortSpec::desc("name"));

        assert_eq!(cycle(Some(&desc), "name"), None);

        // Clicking a different column restarts at ascending
        let other = cycle(Some(&desc), "age").unwrap();
        assert_eq!(other, SortSpec::asc("age"));
    }
}
