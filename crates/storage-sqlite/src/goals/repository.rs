use finflow_core::errors::{Error, Result};
use finflow_core::goals::{
    GoalRepositoryTrait, GoalStatus, NewSavingsGoal, SavingsGoal, SavingsGoalUpdate,
};

use super::model::SavingsGoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::savings_goals;
use crate::schema::savings_goals::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }

    pub fn load_goals_impl(&self, owner: &str, active_only: bool) -> Result<Vec<SavingsGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = savings_goals.filter(user_id.eq(owner)).into_boxed();
        if active_only {
            query = query.filter(status.eq(GoalStatus::Active.as_str()));
        }
        let goals_db = query
            .select(SavingsGoalDB::as_select())
            .order((target_date.asc(), name.asc()))
            .load::<SavingsGoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        goals_db.into_iter().map(SavingsGoal::try_from).collect()
    }
}

fn find_owned(conn: &mut SqliteConnection, owner: &str, goal_id: &str) -> Result<SavingsGoalDB> {
    savings_goals
        .filter(id.eq(goal_id))
        .filter(user_id.eq(owner))
        .select(SavingsGoalDB::as_select())
        .first::<SavingsGoalDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found("SavingsGoal", goal_id))
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goal(&self, owner: &str, goal_id: &str) -> Result<SavingsGoal> {
        let mut conn = get_connection(&self.pool)?;
        find_owned(&mut conn, owner, goal_id)?.try_into()
    }

    fn load_goals(&self, owner: &str, active_only: bool) -> Result<Vec<SavingsGoal>> {
        self.load_goals_impl(owner, active_only)
    }

    async fn insert_new_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsGoal> {
                let new_goal_db: SavingsGoalDB = new_goal.into();
                let result_db = diesel::insert_into(savings_goals::table)
                    .values(&new_goal_db)
                    .returning(SavingsGoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                result_db.try_into()
            })
            .await
    }

    async fn update_goal(&self, goal_update: SavingsGoalUpdate) -> Result<SavingsGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SavingsGoal> {
                let mut goal_db = find_owned(conn, &goal_update.user_id, &goal_update.id)?;
                goal_db.apply(goal_update);
                diesel::update(savings_goals.find(&goal_db.id))
                    .set(&goal_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                goal_db.try_into()
            })
            .await
    }

    async fn delete_goal(&self, owner: &str, goal_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let goal_id_to_delete = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    savings_goals
                        .filter(id.eq(goal_id_to_delete))
                        .filter(user_id.eq(owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
