use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::categories::categories_model::{Category, CategoryType, CategoryUpdate, NewCategory};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { repository }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category> {
        self.repository.get_category(user_id, category_id)
    }

    fn list_categories(
        &self,
        user_id: &str,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>> {
        self.repository.list_categories(user_id, category_type)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        debug!(
            "Creating {} category '{}' for user {}",
            new_category.category_type, new_category.name, new_category.user_id
        );
        self.repository
            .create_category(new_category.normalized())
            .await
    }

    async fn update_category(&self, mut update: CategoryUpdate) -> Result<Category> {
        update.validate()?;
        // Ownership check before touching the row.
        self.repository.get_category(&update.user_id, &update.id)?;
        update.name = update.name.trim().to_string();
        self.repository.update_category(update).await
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize> {
        self.repository.get_category(user_id, category_id)?;
        debug!("Deleting category {} for user {}", category_id, user_id);
        self.repository.delete_category(user_id, category_id).await
    }
}
