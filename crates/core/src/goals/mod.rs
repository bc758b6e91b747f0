//! Goals module - savings goals, derived progress and contributions.

mod goals_calculator;
mod goals_model;
mod goals_service;
mod goals_traits;


pub use goals_calculator::calculate_progress;
pub use goals_model::{
    AddSavingsInput, GoalProgress, NewSavingsGoal, SavingsContribution, SavingsGoal,
    SavingsGoalInput, SavingsGoalWithProgress,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
