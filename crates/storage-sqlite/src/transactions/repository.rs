use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::dsl::{InnerJoin, IntoBoxed};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use fintrack_core::aggregation::Totals;
use fintrack_core::categories::CategoryType;
use fintrack_core::transactions::{
    NewTransaction, Transaction, TransactionPage, TransactionQuery, TransactionRepositoryTrait,
    TransactionSearchResponse, TransactionSort,
};
use fintrack_core::Result;

use super::model::{NewTransactionDB, TransactionDetailsDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{categories, transactions};
use crate::utils::{
    fold_case, from_minor_units, instr, max_bound_minor, min_bound_minor, parse_stored,
};

pub struct TransactionRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load_ledger(&self, query: LedgerQuery<'_>) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = query
            .select(TransactionDetailsDB::as_select())
            .load::<TransactionDetailsDB>(&mut conn)
            .map_err(StorageError::from)?;
        to_domain(rows)
    }
}

type LedgerQuery<'a> = IntoBoxed<'a, InnerJoin<transactions::table, categories::table>, Sqlite>;

/// Ledger rows joined with their category, in ledger order.
fn ledger_query<'a>() -> LedgerQuery<'a> {
    transactions::table
        .inner_join(categories::table)
        .into_boxed()
        .order((transactions::created_at.asc(), transactions::id.asc()))
}

fn to_domain(rows: Vec<TransactionDetailsDB>) -> Result<Vec<Transaction>> {
    rows.into_iter()
        .map(|row| Transaction::try_from(row).map_err(Into::into))
        .collect()
}

/// Loads one ledger row joined with its category.
fn find_details(
    conn: &mut SqliteConnection,
    transaction_id: &str,
) -> std::result::Result<Option<Transaction>, StorageError> {
    transactions::table
        .inner_join(categories::table)
        .filter(transactions::id.eq(transaction_id))
        .select(TransactionDetailsDB::as_select())
        .first::<TransactionDetailsDB>(conn)
        .optional()?
        .map(Transaction::try_from)
        .transpose()
}

/// Inserts a ledger row on the writer's connection and returns it joined.
pub(crate) fn insert_transaction(
    conn: &mut SqliteConnection,
    new_transaction: NewTransaction,
) -> Result<Transaction> {
    let row = NewTransactionDB::from_domain(
        new_transaction,
        Uuid::now_v7().to_string(),
        Utc::now().naive_utc(),
    )?;
    diesel::insert_into(transactions::table)
        .values(&row)
        .execute(conn)
        .map_err(StorageError::from)?;
    find_details(conn, &row.id)?.ok_or_else(|| {
        StorageError::InvalidData(format!("Inserted row {} could not be read back", row.id)).into()
    })
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn find_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(find_details(&mut conn, transaction_id)?)
    }

    fn list_transactions(&self, owner_id: &str) -> Result<Vec<Transaction>> {
        self.load_ledger(ledger_query().filter(transactions::owner_id.eq(owner_id)))
    }

    fn list_all_transactions(&self) -> Result<Vec<Transaction>> {
        self.load_ledger(ledger_query())
    }

    fn list_transactions_between(
        &self,
        owner_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Transaction>> {
        self.load_ledger(
            ledger_query()
                .filter(transactions::owner_id.eq(owner_id))
                .filter(transactions::transaction_date.ge(from))
                .filter(transactions::transaction_date.le(to)),
        )
    }

    fn search_transactions(
        &self,
        owner_id: &str,
        query: &TransactionQuery,
    ) -> Result<TransactionSearchResponse> {
        let mut conn = get_connection(&self.pool)?;
        let filter = query.filter();

        let create_base_query = || {
            let mut q = transactions::table
                .inner_join(categories::table)
                .into_boxed()
                .filter(transactions::owner_id.eq(owner_id.to_string()));

            if let Some(search) = filter.search() {
                q = q.filter(instr(fold_case(transactions::description), search.to_string()).gt(0));
            }
            if let Some(name) = filter.category_name() {
                q = q.filter(categories::name.eq(name.to_string()));
            }
            if let Some(kind) = filter.category_type() {
                q = q.filter(categories::category_type.eq(kind.as_str()));
            }
            if let Some(from) = filter.from() {
                q = q.filter(transactions::transaction_date.ge(from));
            }
            if let Some(to) = filter.to() {
                q = q.filter(transactions::transaction_date.le(to));
            }
            if let Some(min) = filter.min_amount() {
                q = q.filter(transactions::amount_minor.ge(min_bound_minor(min)));
            }
            if let Some(max) = filter.max_amount() {
                q = q.filter(transactions::amount_minor.le(max_bound_minor(max)));
            }

            // Ties always fall back to ledger order.
            match query.sort() {
                TransactionSort::DateAsc => q.order((
                    transactions::transaction_date.asc(),
                    transactions::created_at.asc(),
                    transactions::id.asc(),
                )),
                TransactionSort::DateDesc => q.order((
                    transactions::transaction_date.desc(),
                    transactions::created_at.asc(),
                    transactions::id.asc(),
                )),
                TransactionSort::AmountAsc => q.order((
                    transactions::amount_minor.asc(),
                    transactions::created_at.asc(),
                    transactions::id.asc(),
                )),
                TransactionSort::AmountDesc => q.order((
                    transactions::amount_minor.desc(),
                    transactions::created_at.asc(),
                    transactions::id.asc(),
                )),
                TransactionSort::Unordered => {
                    q.order((transactions::created_at.asc(), transactions::id.asc()))
                }
            }
        };

        // Count, page and totals come from one read transaction.
        let (total_count, rows, amounts) = conn
            .transaction::<_, StorageError, _>(|conn| {
                let total_count = create_base_query().count().get_result::<i64>(conn)?;

                let rows = match query.offset() {
                    Some(offset) => create_base_query()
                        .select(TransactionDetailsDB::as_select())
                        .limit(query.page_size())
                        .offset(offset)
                        .load::<TransactionDetailsDB>(conn)?,
                    None => Vec::new(),
                };

                let amounts = create_base_query()
                    .select((categories::category_type, transactions::amount_minor))
                    .load::<(String, i64)>(conn)?;

                Ok((total_count, rows, amounts))
            })?;

        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for (kind, minor) in amounts {
            if minor <= 0 {
                continue;
            }
            match parse_stored::<CategoryType>("categories.category_type", &kind)? {
                CategoryType::Income => income += from_minor_units(minor),
                CategoryType::Expense => expense += from_minor_units(minor),
            }
        }

        debug!(
            "Search for {} matched {} row(s), returning {}",
            owner_id,
            total_count,
            rows.len()
        );
        let page = TransactionPage {
            items: to_domain(rows)?,
            total_count,
        };
        Ok(TransactionSearchResponse::new(
            query,
            page,
            Totals::new(income, expense),
        ))
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_transaction(conn, new_transaction))
            .await
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<usize> {
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(transactions::table.find(transaction_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
