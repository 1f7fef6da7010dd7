//! Declarative search filters
//!
//! A [`Filter`] is a conjunction of `(field, operator, value)` conditions. The
//! PostgreSQL store renders it as a parameterised `WHERE` clause; any other
//! backend can evaluate it with [`Filter::matches`].

use sqlx::{Postgres, QueryBuilder};

use super::entity::{Entity, Value};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    /// Case-insensitive substring match on text columns
    Contains,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: &'static str,
    pub op: Operator,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(self, field: &'static str, value: impl Into<Value>) -> Self {
        self.with(field, Operator::Eq, value.into())
    }

    pub fn ne(self, field: &'static str, value: impl Into<Value>) -> Self {
        self.with(field, Operator::Ne, value.into())
    }

    pub fn contains(self, field: &'static str, text: impl Into<String>) -> Self {
        self.with(field, Operator::Contains, Value::Text(text.into()))
    }

    fn with(mut self, field: &'static str, op: Operator, value: Value) -> Self {
        self.conditions.push(Condition { field, op, value });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Evaluate the filter against an entity in memory
    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        self.conditions.iter().all(|condition| {
            let Some(actual) = entity.field(condition.field) else {
                return false;
            };
            match condition.op {
                Operator::Eq => actual == condition.value,
                Operator::Ne => actual != condition.value,
                Operator::Contains => match (&actual, &condition.value) {
                    (Value::Text(haystack), Value::Text(needle)) => {
                        haystack.to_lowercase().contains(&needle.to_lowercase())
                    }
                    _ => false,
                },
            }
        })
    }

    /// Append ` WHERE ...` for the conditions of this filter, if any
    pub(crate) fn push_where<T: Entity>(&self, builder: &mut QueryBuilder<'_, Postgres>) -> AppResult<()> {
        for (i, condition) in self.conditions.iter().enumerate() {
            if !T::has_column(condition.field) {
                return Err(AppError::Internal(format!(
                    "Unknown column '{}' for table {}",
                    condition.field,
                    T::TABLE
                )));
            }

            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push(condition.field);

            match (condition.op, &condition.value) {
                (Operator::Eq, value) => {
                    builder.push(" = ");
                    value.clone().push_bind(builder);
                }
                (Operator::Ne, value) => {
                    builder.push(" <> ");
                    value.clone().push_bind(builder);
                }
                (Operator::Contains, Value::Text(text)) => {
                    builder.push(" ILIKE ");
                    builder.push_bind(like_pattern(text));
                }
                (Operator::Contains, _) => {
                    return Err(AppError::Internal(format!(
                        "Substring match requires a text value for column '{}'",
                        condition.field
                    )));
                }
            }
        }
        Ok(())
    }
}

/// `%text%` with LIKE wildcards in `text` escaped
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
