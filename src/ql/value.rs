//! Literal values and small enums shared across the builder

use serde::{Deserialize, Serialize};

/// A literal used as a condition operand, function argument or fill value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Floating point literal
    Float(f64),
    /// Text; quoting depends on where it is rendered
    Str(String),
}

impl Value {
    /// Render as a condition operand
    ///
    /// Strings are single-quoted unless they are `/regex/` or `"reference"` literals;
    /// numbers and booleans are emitted as-is.
    pub fn to_condition(&self) -> String {
        match self {
            Value::Str(s) => super::quote::quote_condition_value(s),
            other => other.to_string(),
        }
    }

    /// Render as a function argument: strings are keys, numbers are raw
    pub fn to_argument(&self) -> String {
        match self {
            Value::Str(s) => super::quote::quote_key(s),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => Str,
    &str => Str,
    &String => Str,
}

macro_rules! value_from_unsigned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                /// Falls back to a float above `i64::MAX`
                fn from(v: $ty) -> Self {
                    i64::try_from(v).map_or(Value::Float(v as f64), Value::Int)
                }
            }
        )*
    };
}

value_from_unsigned!(u64, usize);

/// Right-hand side of a key/value condition
///
/// A list renders as an or-group: `("spdy" = '1' or "spdy" = '2')`.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A single value
    One(Value),
    /// Any of several values
    Any(Vec<Value>),
}

macro_rules! operand_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::One(v.into())
                }
            }

            impl From<Vec<$ty>> for Operand {
                fn from(v: Vec<$ty>) -> Self {
                    Operand::Any(v.into_iter().map(Value::from).collect())
                }
            }
        )*
    };
}

operand_from!(bool, i32, i64, u32, u64, usize, f32, f64, String, &str);

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::One(v)
    }
}

impl From<Vec<Value>> for Operand {
    fn from(v: Vec<Value>) -> Self {
        Operand::Any(v)
    }
}

impl From<&[&str]> for Operand {
    fn from(v: &[&str]) -> Self {
        Operand::Any(v.iter().map(|s| Value::from(*s)).collect())
    }
}

/// How condition fragments are joined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Every fragment must hold
    #[default]
    And,
    /// Any fragment may hold
    Or,
}

impl Relation {
    /// Parse from string, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}

/// Sort direction for `order by time`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl Order {
    /// Parse from string, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}
