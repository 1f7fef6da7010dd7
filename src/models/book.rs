//! Book model and related types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::category::Category;
use crate::repository::entity::{Entity, Value};

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    /// Unique book title
    pub name: String,
    pub author: String,
    pub description: String,
    #[schema(value_type = String, example = "19.90")]
    pub price: Decimal,
    pub publish_date: NaiveDate,
    pub category_id: i32,
    /// Owning category, present on eager-loading reads
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Entity for Book {
    const TABLE: &'static str = "books";
    const COLUMNS: &'static [&'static str] =
        &["name", "author", "description", "price", "publish_date", "category_id"];
    const ORDER_BY: &'static str = "name";

    fn id(&self) -> i32 {
        self.id
    }

    fn field(&self, column: &str) -> Option<Value> {
        match column {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "author" => Some(self.author.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "price" => Some(self.price.into()),
            "publish_date" => Some(self.publish_date.into()),
            "category_id" => Some(self.category_id.into()),
            _ => None,
        }
    }
}

/// Fits a `NUMERIC(12, 2)` column without rounding
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let message = if price.is_sign_negative() {
        "Price must not be negative"
    } else if price.normalize().scale() > 2 {
        "Price must have at most 2 decimal places"
    } else if *price > Decimal::new(999_999_999_999, 2) {
        "Price must not exceed 9999999999.99"
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new("range");
    error.message = Some(message.into());
    Err(error)
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    pub category_id: i32,
    #[validate(length(min = 2, max = 150, message = "Name must be between 2 and 150 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 150, message = "Author must be between 2 and 150 characters"))]
    pub author: String,
    #[validate(length(min = 2, max = 350, message = "Description must be between 2 and 350 characters"))]
    pub description: String,
    #[schema(value_type = String, example = "19.90")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    pub publish_date: NaiveDate,
}

impl From<CreateBook> for Book {
    fn from(data: CreateBook) -> Self {
        Book {
            id: 0,
            name: data.name,
            author: data.author,
            description: data.description,
            price: data.price,
            publish_date: data.publish_date,
            category_id: data.category_id,
            category: None,
        }
    }
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    /// Must match the id in the request path
    pub id: i32,
    pub category_id: i32,
    #[validate(length(min = 2, max = 150, message = "Name must be between 2 and 150 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 150, message = "Author must be between 2 and 150 characters"))]
    pub author: String,
    #[validate(length(min = 2, max = 350, message = "Description must be between 2 and 350 characters"))]
    pub description: String,
    #[schema(value_type = String, example = "19.90")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    pub publish_date: NaiveDate,
}

impl From<UpdateBook> for Book {
    fn from(data: UpdateBook) -> Self {
        Book {
            id: data.id,
            name: data.name,
            author: data.author,
            description: data.description,
            price: data.price,
            publish_date: data.publish_date,
            category_id: data.category_id,
            category: None,
        }
    }
}
