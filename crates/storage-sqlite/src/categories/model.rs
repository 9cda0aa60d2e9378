//! Database model for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use finflow_core::categories::{Category, NewCategory};
use finflow_core::constants::DEFAULT_CATEGORY_COLOR;
use finflow_core::errors::Error;

/// Database model for categories
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CategoryDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub category_type: String,
    pub color: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl TryFrom<CategoryDB> for Category {
    type Error = Error;

    fn try_from(db: CategoryDB) -> Result<Self, Self::Error> {
        Ok(Self {
            category_type: db.category_type.parse()?,
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            color: db.color,
            icon: db.icon,
            description: db.description,
            is_active: db.is_active,
            created_at: db.created_at,
        })
    }
}

impl From<NewCategory> for CategoryDB {
    fn from(domain: NewCategory) -> Self {
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: domain.user_id,
            name: domain.name,
            category_type: domain.category_type.as_str().to_string(),
            color: domain
                .color
                .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
            icon: domain.icon,
            description: domain.description,
            is_active: domain.is_active,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
