use crate::categories::categories_model::{Category, CategoryType, CategoryUpdate, NewCategory};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Get a category owned by the user; `NotFound` otherwise
    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category>;

    /// List the user's categories ordered by type then name
    fn list_categories(
        &self,
        user_id: &str,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>>;

    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    async fn update_category(&self, update: CategoryUpdate) -> Result<Category>;

    /// Delete a category. Transactions keep a null category; budgets on it are removed.
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category>;
    fn list_categories(
        &self,
        user_id: &str,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>>;
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn update_category(&self, update: CategoryUpdate) -> Result<Category>;
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize>;
}
