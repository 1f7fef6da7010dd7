//! Data models for the bookstore

pub mod book;
pub mod category;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use category::{Category, CreateCategory, UpdateCategory};
pub use user::{TokenClaims, User};
