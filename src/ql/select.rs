//! Select list items: plain fields, aliased fields and function calls

use super::quote::quote_key;
use super::value::Value;

/// A field reference in the select list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// `"status"`, or an arithmetic expression such as `"use" + 2`
    Plain(String),
    /// Original name to alias pairs: `"fetch time" as "ft"`
    Aliased(Vec<(String, String)>),
}

impl Field {
    /// A single aliased field
    pub fn alias(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Field::Aliased(vec![(name.into(), alias.into())])
    }

    /// Rendered select expressions for this entry
    pub fn render(&self) -> Vec<String> {
        match self {
            Field::Plain(name) => vec![quote_key(name)],
            Field::Aliased(pairs) => pairs
                .iter()
                .map(|(name, alias)| format!("{} as {}", quote_key(name), quote_key(alias)))
                .collect(),
        }
    }

    /// Drop `name` from this entry; returns false once nothing is left to select
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        match self {
            Field::Plain(field) => field != name,
            Field::Aliased(pairs) => {
                pairs.retain(|(field, _)| field != name);
                !pairs.is_empty()
            }
        }
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::Plain(name.to_string())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::Plain(name)
    }
}

impl<N: Into<String>, A: Into<String>> From<(N, A)> for Field {
    fn from((name, alias): (N, A)) -> Self {
        Field::alias(name, alias)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Raw(String),
    Call { name: String, args: Vec<String> },
}

/// An aggregate, selector or transformation in the select list
///
/// ```rust
/// use influx_ql::Function;
///
/// let f = Function::call("bottom").arg("use").arg(3).alias("bot3Use");
/// assert_eq!(f.render(), "bottom(\"use\",3) as \"bot3Use\"");
///
/// let f = Function::raw("count(\"use\")");
/// assert_eq!(f.render(), "count(\"use\")");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    body: Body,
    alias: Option<String>,
}

impl Function {
    /// A call `name(args...)`; add arguments with [`Function::arg`]
    pub fn call(name: impl Into<String>) -> Self {
        Self {
            body: Body::Call {
                name: name.into(),
                args: Vec::new(),
            },
            alias: None,
        }
    }

    /// A pre-rendered expression used verbatim
    pub fn raw(expr: impl Into<String>) -> Self {
        Self {
            body: Body::Raw(expr.into()),
            alias: None,
        }
    }

    /// Build from loose arguments: `[name, params...]`, or one pre-rendered expression
    pub fn from_args(args: &[&str]) -> Self {
        match args {
            [] => Self::raw(""),
            [expr] => Self::raw(*expr),
            [name, params @ ..] => params
                .iter()
                .fold(Self::call(*name), |f, param| f.arg(*param)),
        }
    }

    /// Append an argument; strings are quoted as keys, numbers stay raw
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        if let Body::Call { args, .. } = &mut self.body {
            args.push(value.into().to_argument());
        }
        self
    }

    /// Name the result column
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The expression without its alias
    pub fn expression(&self) -> String {
        match &self.body {
            Body::Raw(expr) => expr.clone(),
            Body::Call { name, args } => format!("{}({})", name, args.join(",")),
        }
    }

    /// The expression followed by `as "alias"` when aliased
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {}", self.expression(), quote_key(alias)),
            None => self.expression(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(&self.body, Body::Raw(expr) if expr.is_empty())
    }
}

impl From<&str> for Function {
    fn from(expr: &str) -> Self {
        Function::raw(expr)
    }
}

impl From<String> for Function {
    fn from(expr: String) -> Self {
        Function::raw(expr)
    }
}

impl From<&[&str]> for Function {
    fn from(args: &[&str]) -> Self {
        Function::from_args(args)
    }
}
