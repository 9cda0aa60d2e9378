use crate::categories::CategoryRepositoryTrait;
use crate::errors::Result;
use crate::goals::goals_model::{NewSavingsGoal, SavingsGoal, SavingsGoalUpdate};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

pub struct GoalService<T: GoalRepositoryTrait> {
    goal_repo: Arc<T>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
}

impl<T: GoalRepositoryTrait> GoalService<T> {
    pub fn new(goal_repo: Arc<T>, category_repo: Arc<dyn CategoryRepositoryTrait>) -> Self {
        GoalService {
            goal_repo,
            category_repo,
        }
    }

    fn check_category(&self, user_id: &str, category_id: Option<&str>) -> Result<()> {
        if let Some(category_id) = category_id {
            self.category_repo.get_category(user_id, category_id)?;
        }
        Ok(())
    }
}

#[async_trait]
impl<T: GoalRepositoryTrait + Send + Sync> GoalServiceTrait for GoalService<T> {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<SavingsGoal> {
        self.goal_repo.get_goal(user_id, goal_id)
    }

    fn get_goals(&self, user_id: &str, active_only: bool) -> Result<Vec<SavingsGoal>> {
        self.goal_repo.load_goals(user_id, active_only)
    }

    async fn create_goal(&self, mut new_goal: NewSavingsGoal) -> Result<SavingsGoal> {
        new_goal.validate()?;
        self.check_category(&new_goal.user_id, new_goal.category_id.as_deref())?;
        new_goal.name = new_goal.name.trim().to_string();
        debug!(
            "Creating savings goal '{}' for user {}",
            new_goal.name, new_goal.user_id
        );
        self.goal_repo.insert_new_goal(new_goal).await
    }

    async fn update_goal(&self, mut goal_update: SavingsGoalUpdate) -> Result<SavingsGoal> {
        goal_update.validate()?;
        self.goal_repo.get_goal(&goal_update.user_id, &goal_update.id)?;
        self.check_category(&goal_update.user_id, goal_update.category_id.as_deref())?;
        goal_update.name = goal_update.name.trim().to_string();
        self.goal_repo.update_goal(goal_update).await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        self.goal_repo.get_goal(user_id, goal_id)?;
        self.goal_repo.delete_goal(user_id, goal_id).await
    }
}
