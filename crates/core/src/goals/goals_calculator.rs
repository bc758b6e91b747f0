//! Derived savings goal figures.
//!
//! Once the deadline has passed and the goal is still unmet, the remaining
//! amount is due within a single month ("owe it now"). The horizon never
//! drops below one month, so nothing divides by zero or a negative span.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::goals_model::{GoalProgress, SavingsGoal};
use crate::constants::DAYS_PER_MONTH;
use crate::utils::decimal_utils::{percentage_of, round_amount};

pub fn calculate_progress(
    target_amount: Decimal,
    current_amount: Decimal,
    deadline: NaiveDate,
    today: NaiveDate,
) -> GoalProgress {
    let remaining = (target_amount - current_amount).max(Decimal::ZERO);
    let is_goal_met = current_amount >= target_amount;
    let days_left = (deadline - today).num_days();
    let months_left = recovery_months(days_left);

    let monthly_savings_required = if is_goal_met {
        Decimal::ZERO
    } else {
        round_amount(remaining / Decimal::from(months_left))
    };

    let progress_percentage = if target_amount <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        percentage_of(current_amount, target_amount).min(Decimal::ONE_HUNDRED)
    };

    GoalProgress {
        progress_percentage,
        is_goal_met,
        remaining,
        days_left,
        months_left,
        monthly_savings_required,
        is_overdue: !is_goal_met && days_left < 0,
    }
}

/// `ceil(days / 30)` months, at least one.
fn recovery_months(days_left: i64) -> i64 {
    if days_left <= 0 {
        return 1;
    }
    ((days_left + DAYS_PER_MONTH - 1) / DAYS_PER_MONTH).max(1)
}

impl SavingsGoal {
    pub fn progress(&self, today: NaiveDate) -> GoalProgress {
        calculate_progress(self.target_amount, self.current_amount, self.deadline, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn d(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn met_goal_past_deadline_needs_nothing() {
        let progress = calculate_progress(dec!(1000), dec!(1000), d("2024-01-01"), d("2024-06-01"));
        assert!(progress.is_goal_met);
        assert_eq!(progress.monthly_savings_required, Decimal::ZERO);
        assert_eq!(progress.progress_percentage, dec!(100));
        assert!(progress.days_left < 0);
        assert!(!progress.is_overdue);
    }

    #[test]
    fn ninety_days_spread_over_three_months() {
        let today = d("2024-03-01");
        let progress = calculate_progress(dec!(1200), Decimal::ZERO, today + Duration::days(90), today);
        assert_eq!(progress.months_left, 3);
        assert_eq!(progress.monthly_savings_required, dec!(400));
        assert_eq!(progress.progress_percentage, Decimal::ZERO);
    }

    #[test]
    fn partial_months_round_up() {
        let today = d("2024-03-01");
        let progress = calculate_progress(dec!(1000), dec!(100), today + Duration::days(31), today);
        assert_eq!(progress.months_left, 2);
        assert_eq!(progress.monthly_savings_required, dec!(450));

        let progress = calculate_progress(dec!(1000), dec!(100), today + Duration::days(5), today);
        assert_eq!(progress.months_left, 1);
        assert_eq!(progress.monthly_savings_required, dec!(900));
    }

    #[test]
    fn overdue_goal_owes_the_remainder_now() {
        let progress = calculate_progress(dec!(1000), dec!(250), d("2024-01-01"), d("2024-06-01"));
        assert!(progress.is_overdue);
        assert_eq!(progress.months_left, 1);
        assert_eq!(progress.monthly_savings_required, dec!(750));
    }

    #[test]
    fn deadline_today_counts_as_one_month() {
        let today = d("2024-06-01");
        let progress = calculate_progress(dec!(300), dec!(100), today, today);
        assert_eq!(progress.days_left, 0);
        assert_eq!(progress.monthly_savings_required, dec!(200));
        assert!(!progress.is_overdue);
    }

    #[test]
    fn progress_caps_at_one_hundred() {
        let progress = calculate_progress(dec!(100), dec!(250), d("2024-12-01"), d("2024-06-01"));
        assert_eq!(progress.progress_percentage, dec!(100));
        assert_eq!(progress.remaining, Decimal::ZERO);
    }

    #[test]
    fn zero_target_reports_zero_progress() {
        let progress = calculate_progress(Decimal::ZERO, Decimal::ZERO, d("2024-12-01"), d("2024-06-01"));
        assert_eq!(progress.progress_percentage, Decimal::ZERO);
        assert_eq!(progress.monthly_savings_required, Decimal::ZERO);
    }

    #[test]
    fn uneven_split_is_rounded_to_cents() {
        let today = d("2024-01-01");
        let progress = calculate_progress(dec!(100), Decimal::ZERO, today + Duration::days(90), today);
        assert_eq!(progress.monthly_savings_required, dec!(33.33));
    }
}
