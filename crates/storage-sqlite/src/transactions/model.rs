//! Database model for transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use finflow_core::errors::Error;
use finflow_core::transactions::{NewTransaction, Transaction, TransactionUpdate};

use crate::utils::parse_decimal;

/// Database model for transactions. Amounts are stored as text.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub category_id: Option<String>,
    pub payment_method_id: Option<String>,
    pub transaction_type: String,
    pub amount: String,
    pub description: String,
    pub notes: Option<String>,
    pub transaction_date: NaiveDate,
    pub status: String,
    pub is_recurring: bool,
    pub is_reconciled: bool,
    pub tags: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            transaction_type: db.transaction_type.parse()?,
            amount: parse_decimal(&db.amount, "transactions.amount")?,
            status: db.status.parse()?,
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            payment_method_id: db.payment_method_id,
            description: db.description,
            notes: db.notes,
            transaction_date: db.transaction_date,
            is_recurring: db.is_recurring,
            is_reconciled: db.is_reconciled,
            tags: db.tags,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: domain.user_id,
            category_id: domain.category_id,
            payment_method_id: domain.payment_method_id,
            transaction_type: domain.transaction_type.as_str().to_string(),
            amount: domain.amount.to_string(),
            description: domain.description,
            notes: domain.notes,
            transaction_date: domain.transaction_date,
            status: domain.status.as_str().to_string(),
            is_recurring: domain.is_recurring,
            is_reconciled: domain.is_reconciled,
            tags: domain.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TransactionDB {
    /// Copies the editable fields of `update` onto a loaded row.
    pub fn apply(&mut self, update: TransactionUpdate) {
        self.category_id = update.category_id;
        self.payment_method_id = update.payment_method_id;
        self.transaction_type = update.transaction_type.as_str().to_string();
        self.amount = update.amount.to_string();
        self.description = update.description;
        self.notes = update.notes;
        self.transaction_date = update.transaction_date;
        self.status = update.status.as_str().to_string();
        self.is_recurring = update.is_recurring;
        self.is_reconciled = update.is_reconciled;
        self.tags = update.tags;
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}
