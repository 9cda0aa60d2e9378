use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Error, Result};
use crate::payment_methods::PaymentMethodRepositoryTrait;
use crate::transactions::transactions_model::{
    NewTransaction, Transaction, TransactionSearch, TransactionSearchResult, TransactionType,
    TransactionUpdate,
};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};

/// Service for recording and querying transactions
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    payment_method_repository: Arc<dyn PaymentMethodRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        payment_method_repository: Arc<dyn PaymentMethodRepositoryTrait>,
    ) -> Self {
        TransactionService {
            repository,
            category_repository,
            payment_method_repository,
        }
    }

    /// The payment method must belong to the user. New picks must be active;
    /// a transaction may keep the method it already had after it is retired.
    fn check_payment_method(
        &self,
        user_id: &str,
        payment_method_id: Option<&str>,
        current: Option<&str>,
    ) -> Result<()> {
        let Some(payment_method_id) = payment_method_id else {
            return Ok(());
        };
        let method = self
            .payment_method_repository
            .get_payment_method(user_id, payment_method_id)?;
        if !method.is_active && current != Some(payment_method_id) {
            return Err(Error::invalid_input(format!(
                "Payment method '{}' is inactive",
                method.name
            )));
        }
        Ok(())
    }

    /// The category must belong to the same user and have a matching type.
    fn check_category(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        transaction_type: TransactionType,
    ) -> Result<()> {
        let Some(category_id) = category_id else {
            return Ok(());
        };
        let category = self.category_repository.get_category(user_id, category_id)?;
        if !category.category_type.accepts(transaction_type) {
            return Err(Error::invalid_input(format!(
                "Category '{}' is an {} category and cannot be used for {} transactions",
                category.name, category.category_type, transaction_type
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_transaction(user_id, transaction_id)
    }

    fn search_transactions(&self, search: &TransactionSearch) -> Result<TransactionSearchResult> {
        if let (Some(from), Some(to)) = (search.date_from, search.date_to) {
            if from > to {
                return Err(Error::invalid_input(format!(
                    "Search start {} is after end {}",
                    from, to
                )));
            }
        }
        let transactions = self.repository.search_transactions(search)?;
        Ok(TransactionSearchResult::from_transactions(transactions))
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        self.check_category(
            &new_transaction.user_id,
            new_transaction.category_id.as_deref(),
            new_transaction.transaction_type,
        )?;
        self.check_payment_method(
            &new_transaction.user_id,
            new_transaction.payment_method_id.as_deref(),
            None,
        )?;
        debug!(
            "Creating {} transaction of {} for user {}",
            new_transaction.transaction_type, new_transaction.amount, new_transaction.user_id
        );
        self.repository.create_transaction(new_transaction).await
    }

    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction> {
        update.validate()?;
        let existing = self.repository.get_transaction(&update.user_id, &update.id)?;
        self.check_category(
            &update.user_id,
            update.category_id.as_deref(),
            update.transaction_type,
        )?;
        self.check_payment_method(
            &update.user_id,
            update.payment_method_id.as_deref(),
            existing.payment_method_id.as_deref(),
        )?;
        self.repository.update_transaction(update).await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        self.repository.get_transaction(user_id, transaction_id)?;
        debug!("Deleting transaction {} for user {}", transaction_id, user_id);
        self.repository
            .delete_transaction(user_id, transaction_id)
            .await
    }
}
