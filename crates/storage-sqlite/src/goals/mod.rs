//! SQLite storage implementation for savings goals.

mod model;
mod repository;

pub use model::{NewSavingsGoalDB, SavingsGoalDB};
pub use repository::GoalRepository;
