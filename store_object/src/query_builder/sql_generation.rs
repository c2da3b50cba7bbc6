//! Clause rendering
//!
//! Each clause renders in a single traversal that appends placeholders to
//! the SQL text and values to the parameter list in the same order.

use crate::query_builder::filter::{Clause, Combinator};
use serde_json::Value;

/// Name of the single document column every table carries
pub const DOCUMENT_COLUMN: &str = "data";

const ALWAYS_TRUE: &str = "(1 = 1)";
const ALWAYS_FALSE: &str = "(1 = 0)";

/// SQL expression extracting `field` from the document column.
///
/// The path is substituted as-is; see the trust boundary note on [`Clause`].
pub fn json_field(field: &str) -> String {
    format!("{}->>'{}'", DOCUMENT_COLUMN, field)
}

pub struct SqlGenerator;

impl SqlGenerator {
    /// Render a clause into SQL text and its ordered parameters
    pub fn build(clause: &Clause) -> (String, Vec<Value>) {
        let mut values = Vec::new();
        let sql = Self::build_clause_sql(clause, &mut values);
        (sql, values)
    }

    fn build_clause_sql(clause: &Clause, values: &mut Vec<Value>) -> String {
        match clause {
            Clause::Comparison {
                field,
                operator,
                value,
            } => {
                values.push(value.clone());
                format!("({} {} ?)", json_field(field), operator.to_sql())
            }
            Clause::Like { field, pattern } => {
                values.push(Value::String(pattern.clone()));
                format!("({} LIKE ?)", json_field(field))
            }
            Clause::In {
                field,
                values: members,
            } => {
                if members.is_empty() {
                    return ALWAYS_FALSE.to_string();
                }
                values.extend(members.iter().cloned());
                let placeholders = vec!["?"; members.len()].join(",");
                format!("({} IN ({}))", json_field(field), placeholders)
            }
            Clause::Between { field, from, to } => {
                values.push(from.clone());
                values.push(to.clone());
                format!("({} BETWEEN ? AND ?)", json_field(field))
            }
            Clause::Contains {
                field,
                combinator,
                values: members,
            } => Self::build_contains_sql(field, *combinator, members, values),
            Clause::Group {
                combinator,
                clauses,
            } => {
                if clauses.is_empty() {
                    return ALWAYS_TRUE.to_string();
                }

                let separator = format!(" {} ", combinator.to_sql());
                let group_conditions = clauses
                    .iter()
                    .map(|c| Self::build_clause_sql(c, values))
                    .collect::<Vec<_>>()
                    .join(&separator);

                format!("({})", group_conditions)
            }
        }
    }

    fn build_contains_sql(
        field: &str,
        combinator: Combinator,
        members: &[Value],
        values: &mut Vec<Value>,
    ) -> String {
        let single = format!(
            "(EXISTS (SELECT 1 FROM json_each({}) WHERE value = ?))",
            json_field(field)
        );

        match members.len() {
            0 => match combinator {
                Combinator::And => ALWAYS_TRUE.to_string(),
                Combinator::Or => ALWAYS_FALSE.to_string(),
            },
            1 => {
                values.push(members[0].clone());
                single
            }
            n => {
                values.extend(members.iter().cloned());
                let separator = format!(" {} ", combinator.to_sql());
                format!("({})", vec![single.as_str(); n].join(&separator))
            }
        }
    }
}

impl Clause {
    /// SQL boolean expression with `?` placeholders
    pub fn clause(&self) -> String {
        SqlGenerator::build(self).0
    }

    /// Bind values in placeholder order
    pub fn values(&self) -> Vec<Value> {
        SqlGenerator::build(self).1
    }

    /// SQL text and values from a single traversal
    pub fn build(&self) -> (String, Vec<Value>) {
        SqlGenerator::build(self)
    }

    /// Number of `?` placeholders the rendered SQL carries.
    ///
    /// Counted from the clause tree, so `?` inside a field path is not
    /// mistaken for a placeholder.
    pub fn placeholder_count(&self) -> usize {
        match self {
            Clause::Comparison { .. } | Clause::Like { .. } => 1,
            Clause::In { values, .. } | Clause::Contains { values, .. } => values.len(),
            Clause::Between { .. } => 2,
            Clause::Group { clauses, .. } => clauses.iter().map(Clause::placeholder_count).sum(),
        }
    }
}
