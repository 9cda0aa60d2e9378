use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use std::sync::Arc;

use finflow_core::budgets::{AlertStatus, BudgetAlert, BudgetAlertRepositoryTrait, NewBudgetAlert};
use finflow_core::errors::{Error, Result};

use super::model::BudgetAlertDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::budget_alerts;

/// Repository for budget alerts
pub struct BudgetAlertRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetAlertRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_owned(
    conn: &mut SqliteConnection,
    owner: &str,
    alert_id: &str,
) -> Result<BudgetAlertDB> {
    budget_alerts::table
        .filter(budget_alerts::id.eq(alert_id))
        .filter(budget_alerts::user_id.eq(owner))
        .select(BudgetAlertDB::as_select())
        .first::<BudgetAlertDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found("BudgetAlert", alert_id))
}

fn open_alert(
    conn: &mut SqliteConnection,
    owner: &str,
    budget_id: &str,
) -> Result<Option<BudgetAlertDB>> {
    Ok(budget_alerts::table
        .filter(budget_alerts::user_id.eq(owner))
        .filter(budget_alerts::budget_id.eq(budget_id))
        .filter(budget_alerts::status.ne(AlertStatus::Resolved.as_str()))
        .select(BudgetAlertDB::as_select())
        .order(budget_alerts::triggered_at.desc())
        .first::<BudgetAlertDB>(conn)
        .optional()
        .map_err(StorageError::from)?)
}

#[async_trait]
impl BudgetAlertRepositoryTrait for BudgetAlertRepository {
    fn get_alert(&self, owner: &str, alert_id: &str) -> Result<BudgetAlert> {
        let mut conn = get_connection(&self.pool)?;
        find_owned(&mut conn, owner, alert_id)?.try_into()
    }

    fn list_alerts(&self, owner: &str, status: Option<AlertStatus>) -> Result<Vec<BudgetAlert>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = budget_alerts::table
            .filter(budget_alerts::user_id.eq(owner))
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(budget_alerts::status.eq(status.as_str()));
        }

        query
            .select(BudgetAlertDB::as_select())
            .order(budget_alerts::triggered_at.desc())
            .load::<BudgetAlertDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(BudgetAlert::try_from)
            .collect()
    }

    fn find_open_alert(&self, owner: &str, budget_id: &str) -> Result<Option<BudgetAlert>> {
        let mut conn = get_connection(&self.pool)?;
        open_alert(&mut conn, owner, budget_id)?
            .map(BudgetAlert::try_from)
            .transpose()
    }

    async fn create_alert_if_none_open(
        &self,
        new_alert: NewBudgetAlert,
    ) -> Result<Option<BudgetAlert>> {
        self.writer
            .exec(move |conn| -> Result<Option<BudgetAlert>> {
                if open_alert(conn, &new_alert.user_id, &new_alert.budget_id)?.is_some() {
                    return Ok(None);
                }
                let row: BudgetAlertDB = new_alert.into();
                match diesel::insert_into(budget_alerts::table)
                    .values(&row)
                    .execute(conn)
                {
                    Ok(_) => BudgetAlert::try_from(row).map(Some),
                    // Another connection opened one first.
                    Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                        Ok(None)
                    }
                    Err(e) => Err(StorageError::from(e).into()),
                }
            })
            .await
    }

    async fn update_alert_status(
        &self,
        owner: &str,
        alert_id: &str,
        status: AlertStatus,
        acknowledged_at: Option<NaiveDateTime>,
    ) -> Result<BudgetAlert> {
        let owner = owner.to_string();
        let alert_id = alert_id.to_string();
        self.writer
            .exec(move |conn| -> Result<BudgetAlert> {
                let mut row = find_owned(conn, &owner, &alert_id)?;
                row.status = status.as_str().to_string();
                row.acknowledged_at = acknowledged_at;
                diesel::update(budget_alerts::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.try_into()
            })
            .await
    }
}
