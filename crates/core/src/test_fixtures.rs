//! In-memory repositories shared by service tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::categories::{Category, CategoryRepositoryTrait, CategoryType, NewCategory};
use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{GoalRepositoryTrait, NewSavingsGoal, SavingsContribution, SavingsGoal};
use crate::transactions::{
    search_in_memory, NewTransaction, Transaction, TransactionQuery, TransactionRepositoryTrait,
    TransactionSearchResponse,
};

pub(crate) fn d(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

#[derive(Default)]
pub(crate) struct InMemoryLedger {
    categories: RwLock<Vec<Category>>,
    transactions: RwLock<Vec<Transaction>>,
    goals: RwLock<Vec<SavingsGoal>>,
    sequence: AtomicU64,
    unavailable: AtomicBool,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every read and write fail as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn add_category(
        &self,
        id: &str,
        name: &str,
        category_type: CategoryType,
        owner_id: Option<&str>,
    ) -> Category {
        let category = Category {
            id: id.to_string(),
            name: name.to_string(),
            category_type,
            owner_id: owner_id.map(str::to_string),
            created_at: self.next_timestamp(),
        };
        self.categories.write().unwrap().push(category.clone());
        category
    }

    pub fn add_transaction(
        &self,
        owner_id: &str,
        category_id: &str,
        date: &str,
        amount: Decimal,
        description: &str,
    ) -> Transaction {
        self.insert_transaction(NewTransaction {
            id: None,
            owner_id: owner_id.to_string(),
            category_id: category_id.to_string(),
            amount,
            transaction_date: d(date),
            description: description.to_string(),
        })
        .unwrap()
    }

    pub fn add_goal(
        &self,
        id: &str,
        owner_id: &str,
        target: Decimal,
        current: Decimal,
        deadline: &str,
    ) -> SavingsGoal {
        let goal = SavingsGoal {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            name: format!("Goal {}", id),
            target_amount: target,
            current_amount: current,
            deadline: d(deadline),
            created_at: self.next_timestamp(),
        };
        self.goals.write().unwrap().push(goal.clone());
        goal
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.read().unwrap().len()
    }

    fn next_timestamp(&self) -> NaiveDateTime {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst);
        d("2024-01-01").and_hms_opt(0, 0, 0).unwrap() + Duration::seconds(n as i64)
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.sequence.fetch_add(1, Ordering::SeqCst))
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::ConnectionFailed(
                "store offline".to_string(),
            )));
        }
        Ok(())
    }

    fn insert_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let category = self
            .categories
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == new_transaction.category_id)
            .cloned()
            .ok_or_else(|| {
                Error::Database(DatabaseError::ForeignKeyViolation(
                    new_transaction.category_id.clone(),
                ))
            })?;
        let transaction = Transaction {
            id: new_transaction.id.unwrap_or_else(|| self.next_id("tx")),
            owner_id: new_transaction.owner_id,
            category_id: category.id,
            category_name: category.name,
            category_type: category.category_type,
            amount: new_transaction.amount,
            transaction_date: new_transaction.transaction_date,
            description: new_transaction.description,
            created_at: self.next_timestamp(),
        };
        self.transactions.write().unwrap().push(transaction.clone());
        Ok(transaction)
    }

    /// Ledger rows joined with the registry as it is now.
    fn ledger<F>(&self, keep: F) -> Result<Vec<Transaction>>
    where
        F: Fn(&Transaction) -> bool,
    {
        self.check_available()?;
        let categories = self.categories.read().unwrap();
        Ok(self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| keep(t))
            .map(|t| {
                let mut joined = t.clone();
                if let Some(category) = categories.iter().find(|c| c.id == t.category_id) {
                    joined.category_name = category.name.clone();
                    joined.category_type = category.category_type;
                }
                joined
            })
            .collect())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryLedger {
    fn find_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        Ok(self.ledger(|t| t.id == transaction_id)?.into_iter().next())
    }

    fn list_transactions(&self, owner_id: &str) -> Result<Vec<Transaction>> {
        self.ledger(|t| t.owner_id == owner_id)
    }

    fn list_all_transactions(&self) -> Result<Vec<Transaction>> {
        self.ledger(|_| true)
    }

    fn list_transactions_between(
        &self,
        owner_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        self.ledger(|t| {
            t.owner_id == owner_id && t.transaction_date >= from && t.transaction_date <= to
        })
    }

    fn search_transactions(
        &self,
        owner_id: &str,
        query: &TransactionQuery,
    ) -> Result<TransactionSearchResponse> {
        let ledger = self.list_transactions(owner_id)?;
        Ok(search_in_memory(&ledger, query))
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.check_available()?;
        self.insert_transaction(new_transaction)
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<usize> {
        self.check_available()?;
        let mut transactions = self.transactions.write().unwrap();
        let before = transactions.len();
        transactions.retain(|t| t.id != transaction_id);
        Ok(before - transactions.len())
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryLedger {
    fn find_category(&self, category_id: &str) -> Result<Option<Category>> {
        self.check_available()?;
        Ok(self
            .categories
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == category_id)
            .cloned())
    }

    fn list_visible(&self, owner_id: &str) -> Result<Vec<Category>> {
        self.check_available()?;
        Ok(self
            .categories
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.is_visible_to(owner_id))
            .cloned()
            .collect())
    }

    fn list_global(&self) -> Result<Vec<Category>> {
        self.check_available()?;
        Ok(self
            .categories
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.is_global())
            .cloned()
            .collect())
    }

    fn find_visible_by_name(&self, owner_id: &str, name: &str) -> Result<Vec<Category>> {
        Ok(self
            .list_visible(owner_id)?
            .into_iter()
            .filter(|c| c.name == name)
            .collect())
    }

    fn count_transactions(&self, category_id: &str) -> Result<i64> {
        self.check_available()?;
        Ok(self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.category_id == category_id)
            .count() as i64)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.check_available()?;
        let category = Category {
            id: new_category.id.unwrap_or_else(|| self.next_id("cat")),
            name: new_category.name,
            category_type: new_category.category_type,
            owner_id: new_category.owner_id,
            created_at: self.next_timestamp(),
        };
        self.categories.write().unwrap().push(category.clone());
        Ok(category)
    }

    async fn delete_category(&self, category_id: &str) -> Result<usize> {
        self.check_available()?;
        let mut categories = self.categories.write().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != category_id);
        Ok(before - categories.len())
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryLedger {
    fn find_goal(&self, goal_id: &str) -> Result<Option<SavingsGoal>> {
        self.check_available()?;
        Ok(self
            .goals
            .read()
            .unwrap()
            .iter()
            .find(|g| g.id == goal_id)
            .cloned())
    }

    fn list_goals(&self, owner_id: &str) -> Result<Vec<SavingsGoal>> {
        self.check_available()?;
        Ok(self
            .goals
            .read()
            .unwrap()
            .iter()
            .filter(|g| g.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert_goal(&self, new_goal: NewSavingsGoal) -> Result<SavingsGoal> {
        self.check_available()?;
        let goal = SavingsGoal {
            id: new_goal.id.unwrap_or_else(|| self.next_id("goal")),
            owner_id: new_goal.owner_id,
            name: new_goal.name,
            target_amount: new_goal.target_amount,
            current_amount: Decimal::ZERO,
            deadline: new_goal.deadline,
            created_at: self.next_timestamp(),
        };
        self.goals.write().unwrap().push(goal.clone());
        Ok(goal)
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        self.check_available()?;
        let mut goals = self.goals.write().unwrap();
        let before = goals.len();
        goals.retain(|g| g.id != goal_id);
        Ok(before - goals.len())
    }

    async fn add_contribution(
        &self,
        goal_id: &str,
        amount: Decimal,
        ledger_entry: NewTransaction,
    ) -> Result<SavingsContribution> {
        self.check_available()?;
        if self.find_goal(goal_id)?.is_none() {
            return Err(Error::Database(DatabaseError::NotFound(goal_id.to_string())));
        }
        let transaction = self.insert_transaction(ledger_entry)?;
        let mut goals = self.goals.write().unwrap();
        let goal = goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(goal_id.to_string())))?;
        goal.current_amount += amount;
        Ok(SavingsContribution {
            goal: goal.clone(),
            transaction,
        })
    }
}
