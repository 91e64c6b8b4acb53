//! WHERE clause conditions
//!
//! A [`Condition`] describes one fragment of the WHERE clause. It is rendered once,
//! when added to the builder, and stored as text.
//!
//! ```text
//! "code" = 500                          key/value
//! ("spdy" = '1' or "spdy" = '2')        key/list
//! ("code" = 500 and "spdy" = '1')       several pairs
//! (spdy = '1' and method = 'GET')       raw text with a relation word
//! ```

use super::quote::{quote_key, wrap_raw_condition};
use super::value::{Operand, Relation};

const DEFAULT_OPERATOR: &str = "=";

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Raw(String),
    Pairs(Vec<(String, Operand)>),
}

/// One fragment of a WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    body: Body,
    operator: Option<String>,
    relation: Option<Relation>,
}

impl Condition {
    /// A `key <op> value` condition
    pub fn new(key: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::all([(key.into(), value.into())])
    }

    /// A pre-rendered condition, used verbatim
    pub fn raw(expr: impl Into<String>) -> Self {
        Self {
            body: Body::Raw(expr.into()),
            operator: None,
            relation: None,
        }
    }

    /// Several key/value pairs combined with the condition's relation
    pub fn all<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Operand>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            body: Body::Pairs(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            operator: None,
            relation: None,
        }
    }

    /// Append another key/value pair, joined by the condition's relation
    ///
    /// Unlike [`Condition::all`], each pair may carry a different value type.
    pub fn pair(mut self, key: impl Into<String>, value: impl Into<Operand>) -> Self {
        match &mut self.body {
            Body::Pairs(pairs) => pairs.push((key.into(), value.into())),
            Body::Raw(_) => tracing::warn!("Ignoring key/value pair added to a raw condition"),
        }
        self
    }

    /// Set the comparison operator (default `=`)
    pub fn operator(mut self, op: impl Into<String>) -> Self {
        self.operator = Some(op.into().to_lowercase());
        self
    }

    /// Set the relation joining several pairs (default `and`)
    pub fn relation(mut self, relation: Relation) -> Self {
        self.relation = Some(relation);
        self
    }

    /// Apply loosely ordered trailing arguments
    ///
    /// Each argument equal to `and` / `or` (any case) sets the relation; anything else
    /// sets the operator. Later arguments win.
    pub fn args(mut self, args: &[&str]) -> Self {
        for arg in args {
            match Relation::parse(arg) {
                Some(relation) => self.relation = Some(relation),
                None if !arg.is_empty() => self.operator = Some(arg.to_lowercase()),
                None => {}
            }
        }
        self
    }

    /// Render the fragment, or `None` when there is nothing to add
    pub fn render(&self) -> Option<String> {
        match &self.body {
            Body::Raw(expr) if expr.is_empty() => None,
            Body::Raw(expr) => Some(wrap_raw_condition(expr)),
            Body::Pairs(pairs) => {
                let operator = self.operator.as_deref().unwrap_or(DEFAULT_OPERATOR);
                let parts: Vec<String> = pairs
                    .iter()
                    .filter_map(|(key, value)| render_pair(&quote_key(key), operator, value))
                    .collect();

                match parts.len() {
                    0 => None,
                    1 => parts.into_iter().next(),
                    _ => {
                        let join = format!(" {} ", self.relation.unwrap_or_default());
                        Some(format!("({})", parts.join(&join)))
                    }
                }
            }
        }
    }
}

/// An empty any-list has nothing to compare against and is skipped
fn render_pair(key: &str, operator: &str, value: &Operand) -> Option<String> {
    match value {
        Operand::One(v) => Some(format!("{} {} {}", key, operator, v.to_condition())),
        Operand::Any(values) if values.is_empty() => None,
        Operand::Any(values) => {
            let any: Vec<String> = values
                .iter()
                .map(|v| format!("{} {} {}", key, operator, v.to_condition()))
                .collect();
            Some(format!("({})", any.join(" or ")))
        }
    }
}

impl From<&str> for Condition {
    fn from(expr: &str) -> Self {
        Condition::raw(expr)
    }
}

impl From<String> for Condition {
    fn from(expr: String) -> Self {
        Condition::raw(expr)
    }
}

impl<K: Into<String>, V: Into<Operand>> From<(K, V)> for Condition {
    fn from((key, value): (K, V)) -> Self {
        Condition::new(key, value)
    }
}
