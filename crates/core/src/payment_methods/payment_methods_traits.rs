use async_trait::async_trait;

use crate::errors::Result;
use crate::payment_methods::payment_methods_model::{
    NewPaymentMethod, PaymentMethod, PaymentMethodUpdate,
};

/// Trait for payment method repository operations
#[async_trait]
pub trait PaymentMethodRepositoryTrait: Send + Sync {
    /// Get a payment method owned by the user; `NotFound` otherwise
    fn get_payment_method(&self, user_id: &str, payment_method_id: &str)
        -> Result<PaymentMethod>;

    /// Ordered by name
    fn list_payment_methods(&self, user_id: &str, active_only: bool) -> Result<Vec<PaymentMethod>>;

    async fn create_payment_method(&self, new_method: NewPaymentMethod) -> Result<PaymentMethod>;

    async fn update_payment_method(&self, update: PaymentMethodUpdate) -> Result<PaymentMethod>;

    /// Transactions paid with it keep a null payment method.
    async fn delete_payment_method(&self, user_id: &str, payment_method_id: &str)
        -> Result<usize>;
}

/// Trait for payment method service operations
#[async_trait]
pub trait PaymentMethodServiceTrait: Send + Sync {
    fn get_payment_method(&self, user_id: &str, payment_method_id: &str)
        -> Result<PaymentMethod>;
    fn list_payment_methods(&self, user_id: &str, active_only: bool) -> Result<Vec<PaymentMethod>>;
    async fn create_payment_method(&self, new_method: NewPaymentMethod) -> Result<PaymentMethod>;
    async fn update_payment_method(&self, update: PaymentMethodUpdate) -> Result<PaymentMethod>;
    async fn delete_payment_method(&self, user_id: &str, payment_method_id: &str)
        -> Result<usize>;
}
