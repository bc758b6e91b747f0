use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

const MAX_CATEGORY_NAME_LEN: usize = 64;

/// Sign of every transaction filed under a category. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "INCOME",
            CategoryType::Expense => "EXPENSE",
        }
    }

    /// Lowercase label used by the type filter.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(CategoryType::Income),
            "EXPENSE" => Ok(CategoryType::Expense),
            other => Err(Error::invalid_input(format!(
                "Unknown category type '{}', expected INCOME or EXPENSE",
                other
            ))),
        }
    }
}

/// A category as stored in the registry. `owner_id == None` marks a global
/// category managed by administrators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub category_type: CategoryType,
    pub owner_id: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Category {
    pub fn is_global(&self) -> bool {
        self.owner_id.is_none()
    }

    pub fn is_visible_to(&self, owner_id: &str) -> bool {
        match &self.owner_id {
            None => true,
            Some(owner) => owner == owner_id,
        }
    }
}

/// Request payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub category_type: CategoryType,
}

/// Category ready to be persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub name: String,
    pub category_type: CategoryType,
    pub owner_id: Option<String>,
}

impl NewCategory {
    pub fn personal(owner_id: &str, input: CategoryInput) -> Self {
        Self {
            id: None,
            name: input.name.trim().to_string(),
            category_type: input.category_type,
            owner_id: Some(owner_id.to_string()),
        }
    }

    pub fn global(input: CategoryInput) -> Self {
        Self {
            id: None,
            name: input.name.trim().to_string(),
            category_type: input.category_type,
            owner_id: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.name.chars().count() > MAX_CATEGORY_NAME_LEN {
            return Err(Error::invalid_input(format!(
                "Category name must be at most {} characters",
                MAX_CATEGORY_NAME_LEN
            )));
        }
        Ok(())
    }
}
