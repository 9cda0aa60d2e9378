use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use finflow_core::errors::{Error, Result};
use finflow_core::payment_methods::{
    NewPaymentMethod, PaymentMethod, PaymentMethodRepositoryTrait, PaymentMethodUpdate,
};

use super::model::PaymentMethodDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::payment_methods;
use crate::schema::payment_methods::dsl::*;

/// Repository for the cards, accounts and wallets users pay with
pub struct PaymentMethodRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PaymentMethodRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_owned(
    conn: &mut SqliteConnection,
    owner: &str,
    payment_method_id: &str,
) -> Result<PaymentMethodDB> {
    payment_methods
        .filter(id.eq(payment_method_id))
        .filter(user_id.eq(owner))
        .select(PaymentMethodDB::as_select())
        .first::<PaymentMethodDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found("PaymentMethod", payment_method_id))
}

#[async_trait]
impl PaymentMethodRepositoryTrait for PaymentMethodRepository {
    fn get_payment_method(&self, owner: &str, payment_method_id: &str) -> Result<PaymentMethod> {
        let mut conn = get_connection(&self.pool)?;
        find_owned(&mut conn, owner, payment_method_id)?.try_into()
    }

    fn list_payment_methods(&self, owner: &str, active_only: bool) -> Result<Vec<PaymentMethod>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = payment_methods
            .filter(user_id.eq(owner))
            .into_boxed();
        if active_only {
            query = query.filter(is_active.eq(true));
        }
        query
            .select(PaymentMethodDB::as_select())
            .order(name.asc())
            .load::<PaymentMethodDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(PaymentMethod::try_from)
            .collect()
    }

    async fn create_payment_method(&self, new_method: NewPaymentMethod) -> Result<PaymentMethod> {
        self.writer
            .exec(move |conn| -> Result<PaymentMethod> {
                let row: PaymentMethodDB = new_method.into();
                diesel::insert_into(payment_methods::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.try_into()
            })
            .await
    }

    async fn update_payment_method(&self, update: PaymentMethodUpdate) -> Result<PaymentMethod> {
        self.writer
            .exec(move |conn| -> Result<PaymentMethod> {
                let mut row = find_owned(conn, &update.user_id, &update.id)?;
                row.apply(update);
                diesel::update(payment_methods.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.try_into()
            })
            .await
    }

    async fn delete_payment_method(&self, owner: &str, payment_method_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let payment_method_id = payment_method_id.to_string();
        self.writer
            .exec(move |conn| -> Result<usize> {
                let deleted = diesel::delete(
                    payment_methods
                        .filter(id.eq(&payment_method_id))
                        .filter(user_id.eq(&owner)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                debug!(
                    "Deleted {} payment method row(s) for {}",
                    deleted, payment_method_id
                );
                Ok(deleted)
            })
            .await
    }
}
