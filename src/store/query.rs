//! Query and sort dictionaries.
//!
//! A [`Query`] is a mapping of field constraints; the empty mapping
//! matches every record. A [`SortSpec`] is an ordered field → direction
//! mapping applied by the store when materializing a page.

use crate::store::Record;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A single field constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Exact value match.
    Eq(Value),
    /// Case-insensitive substring match against a string field.
    Contains(String),
}

impl Constraint {
    fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            Self::Eq(expected) => value == Some(expected),
            Self::Contains(needle) => match value {
                Some(Value::String(s)) => {
                    s.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
        }
    }
}

/// A mapping of field constraints. Empty = match-all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    constraints: BTreeMap<String, Constraint>,
}

impl Query {
    /// The match-all query.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builder-style constraint on a field.
    pub fn with(mut self, field: impl Into<String>, constraint: Constraint) -> Self {
        self.constraints.insert(field.into(), constraint);
        self
    }

    /// Query selecting a single record by id.
    pub fn by_id(id: &crate::store::RecordId) -> Self {
        Self::all().with("id", Constraint::Eq(Value::String(id.to_string())))
    }

    pub fn is_match_all(&self) -> bool {
        self.constraints.is_empty()
    }

    /// True when every constraint holds for the record.
    pub fn matches(&self, record: &Record) -> bool {
        self.constraints
            .iter()
            .all(|(field, constraint)| constraint.matches(record.field(field).as_ref()))
    }
}

/// Ordering direction for sorted queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

/// Ordered field → direction mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    fields: Vec<(String, OrderDirection)>,
}

impl SortSpec {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn by(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.fields.push((field.into(), direction));
        self
    }

    /// Compares two records field by field, first difference wins.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        for (field, direction) in &self.fields {
            let ord = compare_values(a.field(field).as_ref(), b.field(field).as_ref());
            let ord = match direction {
                OrderDirection::Asc => ord,
                OrderDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl Default for SortSpec {
    /// Name ascending, the paginator's resting sort.
    fn default() -> Self {
        Self::new().by("name", OrderDirection::Asc)
    }
}

/// Missing values sort first; mixed types compare by type rank, like
/// a dynamic document store would.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => type_rank(a).cmp(&type_rank(b)),
        },
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_all_matches_everything() {
        let query = Query::all();
        assert!(query.is_match_all());
        assert!(query.matches(&Record::new("anything")));
    }

    #[test]
    fn test_contains_is_case_insensitive_substring() {
        let query = Query::all().with("name", Constraint::Contains("Foo".into()));
        assert!(query.matches(&Record::new("foobar")));
        assert!(query.matches(&Record::new("BigFOOBAR")));
        assert!(!query.matches(&Record::new("bar")));
    }

    #[test]
    fn test_contains_ignores_non_string_fields() {
        let query = Query::all().with("score", Constraint::Contains("4".into()));
        let record = Record::new("x").with_field("score", json!(42));
        assert!(!query.matches(&record));
    }

    #[test]
    fn test_eq_constraint() {
        let query = Query::all().with("score", Constraint::Eq(json!(42)));
        assert!(query.matches(&Record::new("x").with_field("score", json!(42))));
        assert!(!query.matches(&Record::new("x").with_field("score", json!(7))));
        assert!(!query.matches(&Record::new("x")));
    }

    #[test]
    fn test_by_id_selects_one_record() {
        let record = Record::new("target");
        let other = Record::new("target");
        let query = Query::by_id(&record.id);
        assert!(query.matches(&record));
        assert!(!query.matches(&other));
    }

    #[test]
    fn test_default_sort_is_name_ascending() {
        let sort = SortSpec::default();
        let a = Record::new("alpha");
        let b = Record::new("beta");
        assert_eq!(sort.compare(&a, &b), Ordering::Less);
        assert_eq!(sort.compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn test_descending_sort_reverses() {
        let sort = SortSpec::new().by("name", OrderDirection::Desc);
        let a = Record::new("alpha");
        let b = Record::new("beta");
        assert_eq!(sort.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_missing_values_sort_first() {
        let sort = SortSpec::new().by("score", OrderDirection::Asc);
        let with = Record::new("a").with_field("score", json!(1));
        let without = Record::new("b");
        assert_eq!(sort.compare(&without, &with), Ordering::Less);
    }
}
