//! Database model for savings goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use finflow_core::errors::Error;
use finflow_core::goals::{NewSavingsGoal, SavingsGoal, SavingsGoalUpdate};

use crate::utils::parse_decimal;

/// Database model for savings goals
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::savings_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct SavingsGoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: String,
    pub current_amount: String,
    pub target_date: NaiveDate,
    pub status: String,
    pub category_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl TryFrom<SavingsGoalDB> for SavingsGoal {
    type Error = Error;

    fn try_from(db: SavingsGoalDB) -> Result<Self, Self::Error> {
        Ok(Self {
            target_amount: parse_decimal(&db.target_amount, "savings_goals.target_amount")?,
            current_amount: parse_decimal(&db.current_amount, "savings_goals.current_amount")?,
            status: db.status.parse()?,
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            target_date: db.target_date,
            category_id: db.category_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewSavingsGoal> for SavingsGoalDB {
    fn from(domain: NewSavingsGoal) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: domain.user_id,
            name: domain.name,
            description: domain.description,
            target_amount: domain.target_amount.to_string(),
            current_amount: domain.current_amount.to_string(),
            target_date: domain.target_date,
            status: domain.status.as_str().to_string(),
            category_id: domain.category_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl SavingsGoalDB {
    pub fn apply(&mut self, update: SavingsGoalUpdate) {
        self.name = update.name;
        self.description = update.description;
        self.target_amount = update.target_amount.to_string();
        self.current_amount = update.current_amount.to_string();
        self.target_date = update.target_date;
        self.status = update.status.as_str().to_string();
        self.category_id = update.category_id;
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}
