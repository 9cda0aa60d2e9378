//! Transactions module - domain models, services, and traits.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

pub use transactions_model::{
    CategoryTotal, NewTransaction, Transaction, TransactionSearch, TransactionSearchResult,
    TransactionStatus, TransactionSumFilter, TransactionType, TransactionUpdate,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
