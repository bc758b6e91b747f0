use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::transactions::Transaction;
use crate::utils::decimal_utils::round_amount;

const MAX_GOAL_NAME_LEN: usize = 100;

/// Domain model for a savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub target_amount: Decimal,
    /// Only ever grows, through contributions.
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Request payload for creating a goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalInput {
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
}

/// Input model for creating a new goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSavingsGoal {
    pub id: Option<String>,
    pub owner_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: NaiveDate,
}

impl NewSavingsGoal {
    pub fn from_input(owner_id: &str, input: SavingsGoalInput) -> Result<Self> {
        let deadline = input.deadline.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("deadline".to_string()))
        })?;
        let goal = Self {
            id: None,
            owner_id: owner_id.to_string(),
            name: input.name.trim().to_string(),
            target_amount: round_amount(input.target_amount),
            deadline,
        };
        goal.validate()?;
        Ok(goal)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.name.chars().count() > MAX_GOAL_NAME_LEN {
            return Err(Error::invalid_input(format!(
                "Goal name must be at most {} characters",
                MAX_GOAL_NAME_LEN
            )));
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "Target amount must be greater than zero, got {}",
                self.target_amount
            )));
        }
        Ok(())
    }
}

/// Request payload for a contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSavingsInput {
    pub amount: Decimal,
}

/// Values derived from a goal and the current date. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub progress_percentage: Decimal,
    pub is_goal_met: bool,
    pub remaining: Decimal,
    /// Negative once the deadline has passed.
    pub days_left: i64,
    /// Horizon the remaining amount is spread over; at least one month.
    pub months_left: i64,
    pub monthly_savings_required: Decimal,
    pub is_overdue: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalWithProgress {
    #[serde(flatten)]
    pub goal: SavingsGoal,
    pub progress: GoalProgress,
}

/// Result of adding savings: the updated goal and its ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsContribution {
    pub goal: SavingsGoal,
    pub transaction: Transaction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(target: Decimal, deadline: Option<NaiveDate>) -> SavingsGoalInput {
        SavingsGoalInput {
            name: " Holiday ".into(),
            target_amount: target,
            deadline,
        }
    }

    #[test]
    fn rejects_non_positive_target() {
        let deadline = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert!(NewSavingsGoal::from_input("u1", input(Decimal::ZERO, deadline)).is_err());
        assert!(NewSavingsGoal::from_input("u1", input(dec!(-5), deadline)).is_err());
        let goal = NewSavingsGoal::from_input("u1", input(dec!(1000), deadline)).unwrap();
        assert_eq!(goal.name, "Holiday");
    }

    #[test]
    fn rejects_missing_deadline() {
        let err = NewSavingsGoal::from_input("u1", input(dec!(1000), None)).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::MissingField(_))));
    }
}
