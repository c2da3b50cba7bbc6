//! Predicate algebra
//!
//! A [`Clause`] is an immutable boolean expression over document fields. It
//! renders to a parenthesized SQL fragment with `?` placeholders and an
//! ordered list of values matching those placeholders one-to-one.
//!
//! # Trust boundary
//!
//! Values are never written into SQL text; they travel only through the
//! parameter list. Field paths ARE written into the SQL text verbatim inside
//! the `data->>'<path>'` extraction expression. Field paths must come from
//! trusted code, never from user input: a path containing a quote breaks out
//! of the extraction expression.

use serde_json::Value;

/// Comparison operators for single-value conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,  // =
    Ne,  // !=
    Lt,  // <
    Lte, // <=
    Gt,  // >
    Gte, // >=
}

impl ComparisonOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Lte => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Gte => ">=",
        }
    }
}

/// Logical operators for combining clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

/// A composable condition over document fields
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Comparison {
        field: String,
        operator: ComparisonOperator,
        value: Value,
    },
    /// Set membership. An empty set never matches.
    In { field: String, values: Vec<Value> },
    /// Inclusive range, bounds kept in the order given
    Between {
        field: String,
        from: Value,
        to: Value,
    },
    /// `LIKE` with caller-supplied wildcards
    Like { field: String, pattern: String },
    /// Array membership tests on a JSON array field, one per value
    Contains {
        field: String,
        combinator: Combinator,
        values: Vec<Value>,
    },
    Group {
        combinator: Combinator,
        clauses: Vec<Clause>,
    },
}

impl Clause {
    fn comparison(field: &str, operator: ComparisonOperator, value: Value) -> Self {
        Self::Comparison {
            field: field.to_string(),
            operator,
            value,
        }
    }

    /// `self AND other`, identical to `and(vec![self, other])`
    pub fn and(self, other: Clause) -> Clause {
        and(vec![self, other])
    }

    /// `self OR other`, identical to `or(vec![self, other])`
    pub fn or(self, other: Clause) -> Clause {
        or(vec![self, other])
    }

    /// True for the canonical match-everything clause and any empty group.
    pub fn matches_all(&self) -> bool {
        matches!(self, Clause::Group { clauses, .. } if clauses.is_empty())
    }
}

pub fn equal(field: &str, value: impl Into<Value>) -> Clause {
    Clause::comparison(field, ComparisonOperator::Eq, value.into())
}

pub fn not_equal(field: &str, value: impl Into<Value>) -> Clause {
    Clause::comparison(field, ComparisonOperator::Ne, value.into())
}

pub fn less_than(field: &str, value: impl Into<Value>) -> Clause {
    Clause::comparison(field, ComparisonOperator::Lt, value.into())
}

pub fn less_than_or_equal(field: &str, value: impl Into<Value>) -> Clause {
    Clause::comparison(field, ComparisonOperator::Lte, value.into())
}

pub fn greater_than(field: &str, value: impl Into<Value>) -> Clause {
    Clause::comparison(field, ComparisonOperator::Gt, value.into())
}

pub fn greater_than_or_equal(field: &str, value: impl Into<Value>) -> Clause {
    Clause::comparison(field, ComparisonOperator::Gte, value.into())
}

/// No escaping is applied to `pattern`; `%` and `_` keep their LIKE meaning.
pub fn like(field: &str, pattern: &str) -> Clause {
    Clause::Like {
        field: field.to_string(),
        pattern: pattern.to_string(),
    }
}

pub fn in_values<I, V>(field: &str, values: I) -> Clause
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Clause::In {
        field: field.to_string(),
        values: values.into_iter().map(Into::into).collect(),
    }
}

pub fn between(field: &str, from: impl Into<Value>, to: impl Into<Value>) -> Clause {
    Clause::Between {
        field: field.to_string(),
        from: from.into(),
        to: to.into(),
    }
}

/// Sugar for a single-value [`contains_all`]
pub fn contains(field: &str, value: impl Into<Value>) -> Clause {
    Clause::Contains {
        field: field.to_string(),
        combinator: Combinator::And,
        values: vec![value.into()],
    }
}

pub fn contains_all<I, V>(field: &str, values: I) -> Clause
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Clause::Contains {
        field: field.to_string(),
        combinator: Combinator::And,
        values: values.into_iter().map(Into::into).collect(),
    }
}

pub fn contains_any<I, V>(field: &str, values: I) -> Clause
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Clause::Contains {
        field: field.to_string(),
        combinator: Combinator::Or,
        values: values.into_iter().map(Into::into).collect(),
    }
}

pub fn and(clauses: Vec<Clause>) -> Clause {
    Clause::Group {
        combinator: Combinator::And,
        clauses,
    }
}

pub fn or(clauses: Vec<Clause>) -> Clause {
    Clause::Group {
        combinator: Combinator::Or,
        clauses,
    }
}

/// The match-everything clause, `and(vec![])`
pub fn all() -> Clause {
    and(Vec::new())
}
