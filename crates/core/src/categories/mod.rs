//! Categories module - global and personal income/expense categories.

mod categories_model;
mod categories_service;
mod categories_traits;

pub use categories_model::{Category, CategoryInput, CategoryType, NewCategory};
pub use categories_service::CategoryService;
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
