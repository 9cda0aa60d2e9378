//! Goals module - savings goals and their progress.

mod goals_model;
mod goals_service;
mod goals_traits;

pub use goals_model::{GoalStatus, NewSavingsGoal, SavingsGoal, SavingsGoalUpdate};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
