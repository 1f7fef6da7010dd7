//! Category repository
//!
//! Categories need nothing beyond the generic store: listing is ordered by
//! name and searching goes through [`Filter`](super::Filter).

use super::{CategoryRepository, PgStore};
use crate::models::category::Category;

impl CategoryRepository for PgStore<Category> {}
