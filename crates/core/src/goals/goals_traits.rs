use crate::errors::Result;
use crate::goals::goals_model::{NewSavingsGoal, SavingsGoal, SavingsGoalUpdate};
use async_trait::async_trait;

/// Trait for savings goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<SavingsGoal>;
    /// Ordered by target date, soonest first
    fn load_goals(&self, user_id: &str, active_only: bool) -> Result<Vec<SavingsGoal>>;
    async fn insert_new_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal>;
    async fn update_goal(&self, goal_update: SavingsGoalUpdate) -> Result<SavingsGoal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize>;
}

/// Trait for savings goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<SavingsGoal>;
    fn get_goals(&self, user_id: &str, active_only: bool) -> Result<Vec<SavingsGoal>>;
    async fn create_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal>;
    async fn update_goal(&self, goal_update: SavingsGoalUpdate) -> Result<SavingsGoal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize>;
}
