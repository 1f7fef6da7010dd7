//! Entity base shared by every persisted record

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{postgres::PgRow, FromRow, Postgres, QueryBuilder};

/// Column value as seen by filters and the generic store
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Text(String),
    Decimal(Decimal),
    Date(NaiveDate),
}

impl Value {
    /// Append this value as a bound parameter
    pub(crate) fn push_bind(self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Value::Int(v) => builder.push_bind(v),
            Value::Text(v) => builder.push_bind(v),
            Value::Decimal(v) => builder.push_bind(v),
            Value::Date(v) => builder.push_bind(v),
        };
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

/// A record stored in its own table under a store-assigned integer id.
///
/// `COLUMNS` lists the writable columns (everything but `id`) in the order
/// used for inserts and updates; `field` must answer for each of them and
/// for `"id"`.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Column used to order list and search results
    const ORDER_BY: &'static str = "id";

    fn id(&self) -> i32;

    fn field(&self, column: &str) -> Option<Value>;

    fn has_column(column: &str) -> bool {
        column == "id" || Self::COLUMNS.contains(&column)
    }
}
