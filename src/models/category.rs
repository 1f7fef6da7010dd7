//! Category model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::repository::entity::{Entity, Value};

/// Category record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    /// Unique category name
    pub name: String,
}

impl Entity for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] = &["name"];
    const ORDER_BY: &'static str = "name";

    fn id(&self) -> i32 {
        self.id
    }

    fn field(&self, column: &str) -> Option<Value> {
        match column {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            _ => None,
        }
    }
}

/// Create category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 2, max = 150, message = "Name must be between 2 and 150 characters"))]
    pub name: String,
}

impl From<CreateCategory> for Category {
    fn from(data: CreateCategory) -> Self {
        Category { id: 0, name: data.name }
    }
}

/// Update category request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    /// Must match the id in the request path
    pub id: i32,
    #[validate(length(min = 2, max = 150, message = "Name must be between 2 and 150 characters"))]
    pub name: String,
}

impl From<UpdateCategory> for Category {
    fn from(data: UpdateCategory) -> Self {
        Category { id: data.id, name: data.name }
    }
}
