use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use finflow_core::errors::{Error, Result};
use finflow_core::transactions::{
    CategoryTotal, NewTransaction, Transaction, TransactionRepositoryTrait, TransactionSearch,
    TransactionSumFilter, TransactionUpdate,
};

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{categories, transactions};
use crate::utils::{parse_decimal, sum_decimals};

/// Repository for income and expense transactions.
///
/// Sums are taken over the stored decimal text in Rust so that no amount
/// passes through SQLite's floating point arithmetic.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Transactions matching every predicate set on `filter`.
    fn filtered(filter: &TransactionSumFilter) -> transactions::BoxedQuery<'_, Sqlite> {
        let mut query = transactions::table
            .filter(transactions::user_id.eq(&filter.user_id))
            .into_boxed();

        if let Some(category_id) = &filter.category_id {
            query = query.filter(transactions::category_id.eq(category_id));
        }
        if let Some(kind) = filter.transaction_type {
            query = query.filter(transactions::transaction_type.eq(kind.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(transactions::status.eq(status.as_str()));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(transactions::transaction_date.ge(from));
        }
        if let Some(until) = filter.date_until {
            query = query.filter(transactions::transaction_date.lt(until));
        }
        query
    }

    fn category_names(
        conn: &mut SqliteConnection,
        owner: &str,
    ) -> Result<HashMap<String, String>> {
        let names = categories::table
            .filter(categories::user_id.eq(owner))
            .select((categories::id, categories::name))
            .load::<(String, String)>(conn)
            .map_err(StorageError::from)?;
        Ok(names.into_iter().collect())
    }
}

fn find_owned(
    conn: &mut SqliteConnection,
    owner: &str,
    transaction_id: &str,
) -> Result<TransactionDB> {
    transactions::table
        .filter(transactions::id.eq(transaction_id))
        .filter(transactions::user_id.eq(owner))
        .select(TransactionDB::as_select())
        .first::<TransactionDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found("Transaction", transaction_id))
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_transaction(&self, owner: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        find_owned(&mut conn, owner, transaction_id)?.try_into()
    }

    fn search_transactions(&self, search: &TransactionSearch) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::user_id.eq(&search.user_id))
            .into_boxed();
        if let Some(kind) = search.transaction_type {
            query = query.filter(transactions::transaction_type.eq(kind.as_str()));
        }
        if let Some(category_id) = &search.category_id {
            query = query.filter(transactions::category_id.eq(category_id));
        }
        if let Some(payment_method_id) = &search.payment_method_id {
            query = query.filter(transactions::payment_method_id.eq(payment_method_id));
        }
        if let Some(status) = search.status {
            query = query.filter(transactions::status.eq(status.as_str()));
        }
        if let Some(from) = search.date_from {
            query = query.filter(transactions::transaction_date.ge(from));
        }
        if let Some(to) = search.date_to {
            query = query.filter(transactions::transaction_date.le(to));
        }

        let rows = query
            .select(TransactionDB::as_select())
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        // Amount bounds compare decimals, not text.
        let mut found = Vec::with_capacity(rows.len());
        for row in rows {
            let transaction = Transaction::try_from(row)?;
            if search.amount_min.map_or(true, |min| transaction.amount >= min)
                && search.amount_max.map_or(true, |max| transaction.amount <= max)
            {
                found.push(transaction);
            }
        }
        Ok(found)
    }

    fn sum_amount(&self, filter: &TransactionSumFilter) -> Result<Decimal> {
        let mut conn = get_connection(&self.pool)?;
        let amounts = Self::filtered(filter)
            .select(transactions::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(sum_decimals(&amounts, "transactions.amount")?)
    }

    fn sum_by_category(&self, filter: &TransactionSumFilter) -> Result<Vec<CategoryTotal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::filtered(filter)
            .select((transactions::category_id, transactions::amount))
            .load::<(Option<String>, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let mut groups: HashMap<Option<String>, (Decimal, i64)> = HashMap::new();
        for (category_id, amount) in rows {
            let entry = groups.entry(category_id).or_default();
            entry.0 += parse_decimal(&amount, "transactions.amount")?;
            entry.1 += 1;
        }

        let names = Self::category_names(&mut conn, &filter.user_id)?;
        let mut totals: Vec<CategoryTotal> = groups
            .into_iter()
            .map(|(category_id, (total, count))| CategoryTotal {
                category_name: category_id
                    .as_ref()
                    .and_then(|c| names.get(c).cloned()),
                category_id,
                total,
                count,
            })
            .collect();
        totals.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category_id.cmp(&b.category_id))
        });
        Ok(totals)
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn| -> Result<Transaction> {
                let row: TransactionDB = new_transaction.into();
                diesel::insert_into(transactions::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.try_into()
            })
            .await
    }

    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction> {
        self.writer
            .exec(move |conn| -> Result<Transaction> {
                let mut row = find_owned(conn, &update.user_id, &update.id)?;
                row.apply(update);
                diesel::update(transactions::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.try_into()
            })
            .await
    }

    async fn delete_transaction(&self, owner: &str, transaction_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn| -> Result<usize> {
                Ok(diesel::delete(
                    transactions::table
                        .filter(transactions::id.eq(&transaction_id))
                        .filter(transactions::user_id.eq(&owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
