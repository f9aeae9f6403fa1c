//! Query criteria: a conjunction of equality and membership conditions.
//!
//! Conditions reference serialized field names (the `fields` constants
//! exported by each record module). Values go through [`FieldValue`]
//! rather than raw JSON so building a query can never fail.

use serde_json::Value;
use uuid::Uuid;

/// A typed condition value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// String value.
    Str(String),
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Object identifier (serialized as its hyphenated string form).
    Id(Uuid),
}

impl FieldValue {
    /// Returns the JSON representation this value compares against.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::Number((*i).into()),
            Self::Id(id) => Value::String(id.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self {
        Self::Id(v)
    }
}

#[derive(Debug, Clone)]
enum Condition {
    /// Field equals value.
    Eq {
        field: &'static str,
        value: FieldValue,
    },
    /// Field value is one of the given identifiers.
    AnyOf {
        field: &'static str,
        ids: Vec<Uuid>,
    },
}

/// A conjunction of conditions over one collection.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    conditions: Vec<Condition>,
}

impl Criteria {
    /// Creates an empty criteria set (matches every document).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition.
    #[must_use]
    pub fn eq(mut self, field: &'static str, value: impl Into<FieldValue>) -> Self {
        self.conditions.push(Condition::Eq {
            field,
            value: value.into(),
        });
        self
    }

    /// Adds a membership condition: the field must equal one of `ids`.
    ///
    /// An empty id list matches nothing.
    #[must_use]
    pub fn any_of(mut self, field: &'static str, ids: &[Uuid]) -> Self {
        self.conditions.push(Condition::AnyOf {
            field,
            ids: ids.to_vec(),
        });
        self
    }

    /// Evaluates the conjunction against a serialized document.
    #[must_use]
    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|cond| match cond {
            Condition::Eq { field, value } => {
                doc.get(field).is_some_and(|v| *v == value.to_json())
            }
            Condition::AnyOf { field, ids } => doc.get(field).is_some_and(|v| {
                v.as_str()
                    .and_then(|s| Uuid::parse_str(s).ok())
                    .is_some_and(|id| ids.contains(&id))
            }),
        })
    }
}
