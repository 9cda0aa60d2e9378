use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::transactions::transactions_model::{
    CategoryTotal, NewTransaction, Transaction, TransactionSearch, TransactionSearchResult,
    TransactionSumFilter, TransactionUpdate,
};

/// Trait for transaction repository operations.
///
/// This is also the query interface the budget engine aggregates through.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;

    /// Newest first (by transaction date, then creation time)
    fn search_transactions(&self, search: &TransactionSearch) -> Result<Vec<Transaction>>;

    /// Sum of `amount` over matching rows; zero when nothing matches.
    fn sum_amount(&self, filter: &TransactionSumFilter) -> Result<Decimal>;

    /// Sums grouped by category, largest total first.
    fn sum_by_category(&self, filter: &TransactionSumFilter) -> Result<Vec<CategoryTotal>>;

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction>;

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn search_transactions(&self, search: &TransactionSearch) -> Result<TransactionSearchResult>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, update: TransactionUpdate) -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
}
