use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use finflow_core::budgets::{Budget, BudgetFilter, BudgetRepositoryTrait, BudgetUpdate, NewBudget};
use finflow_core::errors::{Error, Result};

use super::model::BudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::budgets;

/// Repository for category budgets
pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_owned(conn: &mut SqliteConnection, owner: &str, budget_id: &str) -> Result<BudgetDB> {
    budgets::table
        .filter(budgets::id.eq(budget_id))
        .filter(budgets::user_id.eq(owner))
        .select(BudgetDB::as_select())
        .first::<BudgetDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found("Budget", budget_id))
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budget(&self, owner: &str, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        find_owned(&mut conn, owner, budget_id)?.try_into()
    }

    fn list_budgets(&self, owner: &str, filter: &BudgetFilter) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = budgets::table
            .filter(budgets::user_id.eq(owner))
            .into_boxed();
        if let Some(frequency) = filter.frequency {
            query = query.filter(budgets::frequency.eq(frequency.as_str()));
        }
        if let Some(active) = filter.is_active {
            query = query.filter(budgets::is_active.eq(active));
        }

        query
            .select(BudgetDB::as_select())
            .order((budgets::start_date.desc(), budgets::created_at.desc()))
            .load::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Budget::try_from)
            .collect()
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        self.writer
            .exec(move |conn| -> Result<Budget> {
                let row: BudgetDB = new_budget.into();
                diesel::insert_into(budgets::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.try_into()
            })
            .await
    }

    async fn update_budget(&self, update: BudgetUpdate) -> Result<Budget> {
        self.writer
            .exec(move |conn| -> Result<Budget> {
                let mut row = find_owned(conn, &update.user_id, &update.id)?;
                row.apply(update);
                diesel::update(budgets::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.try_into()
            })
            .await
    }

    async fn delete_budget(&self, owner: &str, budget_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn| -> Result<usize> {
                Ok(diesel::delete(
                    budgets::table
                        .filter(budgets::id.eq(&budget_id))
                        .filter(budgets::user_id.eq(&owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
