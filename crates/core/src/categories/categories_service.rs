use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::categories_model::{Category, CategoryInput, CategoryType, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result};

pub struct CategoryService {
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(category_repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService {
            category_repository,
        }
    }

    fn ensure_unused(&self, category: &Category) -> Result<()> {
        let references = self.category_repository.count_transactions(&category.id)?;
        if references > 0 {
            return Err(Error::ConstraintViolation(format!(
                "Category '{}' is still used by {} transaction(s)",
                category.name, references
            )));
        }
        Ok(())
    }

    fn sorted(mut categories: Vec<Category>) -> Vec<Category> {
        categories.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        categories
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self, owner_id: &str) -> Result<Vec<Category>> {
        Ok(Self::sorted(self.category_repository.list_visible(owner_id)?))
    }

    fn get_global_categories(&self) -> Result<Vec<Category>> {
        Ok(Self::sorted(self.category_repository.list_global()?))
    }

    fn get_visible_category(&self, owner_id: &str, category_id: &str) -> Result<Category> {
        match self.category_repository.find_category(category_id)? {
            Some(category) if category.is_visible_to(owner_id) => Ok(category),
            _ => Err(Error::NotFound(format!("Category {} not found", category_id))),
        }
    }

    async fn create_category(&self, owner_id: &str, input: CategoryInput) -> Result<Category> {
        let new_category = NewCategory::personal(owner_id, input);
        new_category.validate()?;

        let clashes = self
            .category_repository
            .find_visible_by_name(owner_id, &new_category.name)?;
        if !clashes.is_empty() {
            return Err(Error::ConstraintViolation(format!(
                "Category '{}' already exists",
                new_category.name
            )));
        }

        let created = self.category_repository.create_category(new_category).await?;
        debug!("Created personal category {} for {}", created.id, owner_id);
        Ok(created)
    }

    async fn create_global_category(&self, input: CategoryInput) -> Result<Category> {
        let new_category = NewCategory::global(input);
        new_category.validate()?;

        let exists = self
            .category_repository
            .list_global()?
            .iter()
            .any(|c| c.name == new_category.name);
        if exists {
            return Err(Error::ConstraintViolation(format!(
                "Global category '{}' already exists",
                new_category.name
            )));
        }

        let created = self.category_repository.create_category(new_category).await?;
        info!("Created global category '{}'", created.name);
        Ok(created)
    }

    async fn delete_category(&self, owner_id: &str, category_id: &str) -> Result<()> {
        let category = self
            .category_repository
            .find_category(category_id)?
            .ok_or_else(|| Error::NotFound(format!("Category {} not found", category_id)))?;

        match &category.owner_id {
            None => {
                return Err(Error::ConstraintViolation(
                    "Global categories can only be deleted by an administrator".to_string(),
                ))
            }
            Some(owner) if owner != owner_id => {
                return Err(Error::NotFound(format!("Category {} not found", category_id)))
            }
            Some(_) => {}
        }

        self.ensure_unused(&category)?;
        self.category_repository.delete_category(category_id).await?;
        Ok(())
    }

    async fn delete_global_category(&self, category_id: &str) -> Result<()> {
        let category = self
            .category_repository
            .find_category(category_id)?
            .filter(Category::is_global)
            .ok_or_else(|| {
                Error::NotFound(format!("Global category {} not found", category_id))
            })?;

        self.ensure_unused(&category)?;
        self.category_repository.delete_category(category_id).await?;
        info!("Deleted global category '{}'", category.name);
        Ok(())
    }

    async fn resolve_or_create(
        &self,
        owner_id: &str,
        name: &str,
        category_type: CategoryType,
    ) -> Result<Category> {
        let name = name.trim();
        let mut matches = self
            .category_repository
            .find_visible_by_name(owner_id, name)?;
        // Personal categories win over globals of the same name.
        matches.sort_by_key(|c| c.is_global());

        if let Some(found) = matches.iter().find(|c| c.category_type == category_type) {
            return Ok(found.clone());
        }
        if let Some(other) = matches.first() {
            return Err(Error::ConstraintViolation(format!(
                "Category '{}' already exists with type {}",
                other.name, other.category_type
            )));
        }

        self.create_category(
            owner_id,
            CategoryInput {
                name: name.to_string(),
                category_type,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::RwLock;

    // ============== Mock Repository ==============

    #[derive(Default)]
    struct MockCategoryRepository {
        categories: RwLock<Vec<Category>>,
        usage: RwLock<HashMap<String, i64>>,
    }

    impl MockCategoryRepository {
        fn with(categories: Vec<Category>) -> Self {
            Self {
                categories: RwLock::new(categories),
                usage: RwLock::new(HashMap::new()),
            }
        }

        fn set_usage(&self, category_id: &str, count: i64) {
            self.usage
                .write()
                .unwrap()
                .insert(category_id.to_string(), count);
        }
    }

    #[async_trait]
    impl CategoryRepositoryTrait for MockCategoryRepository {
        fn find_category(&self, category_id: &str) -> Result<Option<Category>> {
            Ok(self
                .categories
                .read()
                .unwrap()
                .iter()
                .find(|c| c.id == category_id)
                .cloned())
        }

        fn list_visible(&self, owner_id: &str) -> Result<Vec<Category>> {
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
            Ok(*self.usage.read().unwrap().get(category_id).unwrap_or(&0))
        }

        async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
            let mut categories = self.categories.write().unwrap();
            let category = Category {
                id: format!("cat-{}", categories.len() + 1),
                name: new_category.name,
                category_type: new_category.category_type,
                owner_id: new_category.owner_id,
                created_at: created_at(),
            };
            categories.push(category.clone());
            Ok(category)
        }

        async fn delete_category(&self, category_id: &str) -> Result<usize> {
            let mut categories = self.categories.write().unwrap();
            let before = categories.len();
            categories.retain(|c| c.id != category_id);
            Ok(before - categories.len())
        }
    }

    fn created_at() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn category(id: &str, name: &str, kind: CategoryType, owner: Option<&str>) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            category_type: kind,
            owner_id: owner.map(str::to_string),
            created_at: created_at(),
        }
    }

    fn service(repo: Arc<MockCategoryRepository>) -> CategoryService {
        CategoryService::new(repo)
    }

    fn seeded() -> Arc<MockCategoryRepository> {
        Arc::new(MockCategoryRepository::with(vec![
            category("g-salary", "Salary", CategoryType::Income, None),
            category("g-food", "Food", CategoryType::Expense, None),
            category("alice-pets", "Pets", CategoryType::Expense, Some("alice")),
            category("bob-pets", "Pets", CategoryType::Expense, Some("bob")),
        ]))
    }

    #[test]
    fn lists_globals_and_own_personal_categories_sorted() {
        let svc = service(seeded());
        let names: Vec<String> = svc
            .get_categories("alice")
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(names, vec!["g-food", "alice-pets", "g-salary"]);
    }

    #[tokio::test]
    async fn personal_category_cannot_shadow_a_global_name() {
        let svc = service(seeded());
        let err = svc
            .create_category(
                "alice",
                CategoryInput {
                    name: "Food".into(),
                    category_type: CategoryType::Expense,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn different_owners_may_reuse_a_personal_name() {
        let svc = service(seeded());
        let created = svc
            .create_category(
                "carol",
                CategoryInput {
                    name: " Pets ".into(),
                    category_type: CategoryType::Expense,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.name, "Pets");
        assert_eq!(created.owner_id.as_deref(), Some("carol"));
    }

    #[tokio::test]
    async fn deleting_a_referenced_category_is_a_conflict() {
        let repo = seeded();
        repo.set_usage("alice-pets", 3);
        let svc = service(repo.clone());

        let err = svc.delete_category("alice", "alice-pets").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(repo.find_category("alice-pets").unwrap().is_some());
    }

    #[tokio::test]
    async fn owners_cannot_delete_global_or_foreign_categories() {
        let svc = service(seeded());

        let global = svc.delete_category("alice", "g-food").await.unwrap_err();
        assert_eq!(global.kind(), ErrorKind::Conflict);

        let foreign = svc.delete_category("alice", "bob-pets").await.unwrap_err();
        assert_eq!(foreign.kind(), ErrorKind::NotFound);

        let missing = svc.delete_category("alice", "nope").await.unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn owner_deletes_unused_personal_category() {
        let repo = seeded();
        let svc = service(repo.clone());
        svc.delete_category("alice", "alice-pets").await.unwrap();
        assert!(repo.find_category("alice-pets").unwrap().is_none());
    }

    #[tokio::test]
    async fn admin_delete_only_targets_global_categories() {
        let repo = seeded();
        let svc = service(repo.clone());

        let err = svc.delete_global_category("alice-pets").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        repo.set_usage("g-salary", 1);
        let err = svc.delete_global_category("g-salary").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        svc.delete_global_category("g-food").await.unwrap();
        assert!(repo.find_category("g-food").unwrap().is_none());
    }

    #[tokio::test]
    async fn resolve_or_create_reuses_matching_type_and_rejects_mismatch() {
        let repo = seeded();
        let svc = service(repo.clone());

        let food = svc
            .resolve_or_create("alice", "Food", CategoryType::Expense)
            .await
            .unwrap();
        assert_eq!(food.id, "g-food");

        let err = svc
            .resolve_or_create("alice", "Food", CategoryType::Income)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let created = svc
            .resolve_or_create("alice", "Bonus", CategoryType::Income)
            .await
            .unwrap();
        assert_eq!(created.owner_id.as_deref(), Some("alice"));
        assert_eq!(created.category_type, CategoryType::Income);
    }
}
