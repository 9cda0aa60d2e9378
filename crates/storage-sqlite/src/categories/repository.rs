use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use finflow_core::categories::{
    Category, CategoryRepositoryTrait, CategoryType, CategoryUpdate, NewCategory,
};
use finflow_core::errors::{Error, Result};

use super::model::CategoryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::categories;
use crate::schema::categories::dsl::*;

/// Repository for user categories
pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_owned(
    conn: &mut SqliteConnection,
    owner: &str,
    category_id: &str,
) -> Result<CategoryDB> {
    categories
        .filter(id.eq(category_id))
        .filter(user_id.eq(owner))
        .select(CategoryDB::as_select())
        .first::<CategoryDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found("Category", category_id))
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_category(&self, owner: &str, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;
        find_owned(&mut conn, owner, category_id)?.try_into()
    }

    fn list_categories(
        &self,
        owner: &str,
        type_filter: Option<CategoryType>,
    ) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = categories::table
            .filter(user_id.eq(owner))
            .into_boxed();
        if let Some(kind) = type_filter {
            query = query.filter(category_type.eq(kind.as_str()));
        }

        query
            .select(CategoryDB::as_select())
            .order((category_type.asc(), name.asc()))
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn| -> Result<Category> {
                let row: CategoryDB = new_category.into();
                diesel::insert_into(categories::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.try_into()
            })
            .await
    }

    async fn update_category(&self, update: CategoryUpdate) -> Result<Category> {
        self.writer
            .exec(move |conn| -> Result<Category> {
                let mut row = find_owned(conn, &update.user_id, &update.id)?;
                row.name = update.name;
                row.color = update.color;
                row.icon = update.icon;
                row.description = update.description;
                row.is_active = update.is_active;

                diesel::update(categories.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.try_into()
            })
            .await
    }

    async fn delete_category(&self, owner: &str, category_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn| -> Result<usize> {
                let deleted = diesel::delete(
                    categories
                        .filter(id.eq(&category_id))
                        .filter(user_id.eq(&owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                debug!("Deleted {} category row(s) for {}", deleted, category_id);
                Ok(deleted)
            })
            .await
    }
}
