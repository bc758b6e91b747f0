use async_trait::async_trait;

use crate::categories::categories_model::{Category, CategoryInput, CategoryType, NewCategory};
use crate::errors::Result;

/// Trait for category registry operations
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    fn find_category(&self, category_id: &str) -> Result<Option<Category>>;
    /// Global categories plus the owner's personal ones.
    fn list_visible(&self, owner_id: &str) -> Result<Vec<Category>>;
    fn list_global(&self) -> Result<Vec<Category>>;
    fn find_visible_by_name(&self, owner_id: &str, name: &str) -> Result<Vec<Category>>;
    fn count_transactions(&self, category_id: &str) -> Result<i64>;
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn delete_category(&self, category_id: &str) -> Result<usize>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn get_categories(&self, owner_id: &str) -> Result<Vec<Category>>;
    fn get_global_categories(&self) -> Result<Vec<Category>>;
    /// Fails with `NotFound` unless the category exists and is visible to the owner.
    fn get_visible_category(&self, owner_id: &str, category_id: &str) -> Result<Category>;
    async fn create_category(&self, owner_id: &str, input: CategoryInput) -> Result<Category>;
    async fn create_global_category(&self, input: CategoryInput) -> Result<Category>;
    async fn delete_category(&self, owner_id: &str, category_id: &str) -> Result<()>;
    async fn delete_global_category(&self, category_id: &str) -> Result<()>;
    /// Finds a visible category by name and type, creating a personal one if absent.
    async fn resolve_or_create(
        &self,
        owner_id: &str,
        name: &str,
        category_type: CategoryType,
    ) -> Result<Category>;
}
