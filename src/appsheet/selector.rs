//! Typed filter criteria for AppSheet "Find" requests.
//!
//! Criteria are held as structured values and only serialized to the remote
//! selector grammar (`Filter(<table>, AND(field=value, ...))`) at the request
//! boundary, so the serializer can be tested in isolation.

use std::fmt;

/// A single literal usable on the right-hand side of a criterion. String
/// values are JSON-string-encoded when rendered (quoted and escaped); numbers
/// and booleans are inlined as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    fn render(&self) -> String {
        match self {
            // Display on serde_json::Value is infallible and gives us JSON
            // string quoting/escaping.
            FieldValue::Text(s) => serde_json::Value::String(s.clone()).to_string(),
            FieldValue::Number(n) => format!("{n}"),
            FieldValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// One `field = value` equality test.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub field: String,
    pub value: FieldValue,
}

impl Criterion {
    pub fn new(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => write!(f, "AND"),
            Combinator::Or => write!(f, "OR"),
        }
    }
}

/// A complete filter expression over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    table: String,
    combinator: Combinator,
    criteria: Vec<Criterion>,
}

impl Selector {
    /// Conjunction of equality criteria: every criterion must match.
    pub fn all_of(table: impl Into<String>, criteria: Vec<Criterion>) -> Self {
        Self {
            table: table.into(),
            combinator: Combinator::And,
            criteria,
        }
    }

    /// Membership filter: `field` must equal one of `values`. Used to fetch
    /// several rows by an explicit id list.
    pub fn any_of<I, V>(table: impl Into<String>, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        Self {
            table: table.into(),
            combinator: Combinator::Or,
            criteria: values
                .into_iter()
                .map(|v| Criterion::new(field, v))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Serialize to the remote selector grammar.
    pub fn render(&self) -> String {
        let body = self
            .criteria
            .iter()
            .map(|c| format!("{}={}", c.field, c.value.render()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Filter({}, {}({}))", self.table, self.combinator, body)
    }
}
