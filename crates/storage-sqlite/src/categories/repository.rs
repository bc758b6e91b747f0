use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::categories::{Category, CategoryRepositoryTrait, NewCategory};
use fintrack_core::{Error, Result};

use super::model::{CategoryDB, NewCategoryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{categories, transactions};

pub struct CategoryRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }

    fn load(rows: Vec<CategoryDB>) -> Result<Vec<Category>> {
        rows.into_iter()
            .map(|row| Category::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn find_category(&self, category_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let row = categories::table
            .find(category_id)
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(Category::try_from)
            .transpose()
            .map_err(Into::into)
    }

    fn list_visible(&self, owner_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(
                categories::owner_id
                    .is_null()
                    .or(categories::owner_id.eq(owner_id)),
            )
            .order((categories::name.asc(), categories::id.asc()))
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::load(rows)
    }

    fn list_global(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::owner_id.is_null())
            .order((categories::name.asc(), categories::id.asc()))
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::load(rows)
    }

    fn find_visible_by_name(&self, owner_id: &str, name: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::name.eq(name))
            .filter(
                categories::owner_id
                    .is_null()
                    .or(categories::owner_id.eq(owner_id)),
            )
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Self::load(rows)
    }

    fn count_transactions(&self, category_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(transactions::table
            .filter(transactions::category_id.eq(category_id))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let row = NewCategoryDB::from_domain(
                    new_category,
                    Uuid::now_v7().to_string(),
                    Utc::now().naive_utc(),
                );
                let created = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::try_from(created)?)
            })
            .await
    }

    async fn delete_category(&self, category_id: &str) -> Result<usize> {
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let in_use = transactions::table
                    .filter(transactions::category_id.eq(&category_id))
                    .count()
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                if in_use > 0 {
                    return Err(Error::ConstraintViolation(format!(
                        "category {} is used by {} transaction(s)",
                        category_id, in_use
                    )));
                }
                Ok(diesel::delete(categories::table.find(category_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
