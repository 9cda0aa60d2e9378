use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::Result;
use crate::payment_methods::payment_methods_model::{
    NewPaymentMethod, PaymentMethod, PaymentMethodUpdate,
};
use crate::payment_methods::payment_methods_traits::{
    PaymentMethodRepositoryTrait, PaymentMethodServiceTrait,
};

pub struct PaymentMethodService {
    repository: Arc<dyn PaymentMethodRepositoryTrait>,
}

impl PaymentMethodService {
    pub fn new(repository: Arc<dyn PaymentMethodRepositoryTrait>) -> Self {
        PaymentMethodService { repository }
    }
}

#[async_trait]
impl PaymentMethodServiceTrait for PaymentMethodService {
    fn get_payment_method(
        &self,
        user_id: &str,
        payment_method_id: &str,
    ) -> Result<PaymentMethod> {
        self.repository.get_payment_method(user_id, payment_method_id)
    }

    fn list_payment_methods(&self, user_id: &str, active_only: bool) -> Result<Vec<PaymentMethod>> {
        self.repository.list_payment_methods(user_id, active_only)
    }

    async fn create_payment_method(&self, new_method: NewPaymentMethod) -> Result<PaymentMethod> {
        new_method.validate()?;
        debug!(
            "Creating {} payment method '{}' for user {}",
            new_method.payment_type, new_method.name, new_method.user_id
        );
        self.repository
            .create_payment_method(new_method.normalized())
            .await
    }

    async fn update_payment_method(&self, update: PaymentMethodUpdate) -> Result<PaymentMethod> {
        update.validate()?;
        self.repository
            .get_payment_method(&update.user_id, &update.id)?;
        self.repository
            .update_payment_method(update.normalized())
            .await
    }

    async fn delete_payment_method(
        &self,
        user_id: &str,
        payment_method_id: &str,
    ) -> Result<usize> {
        self.repository
            .get_payment_method(user_id, payment_method_id)?;
        debug!(
            "Deleting payment method {} for user {}",
            payment_method_id, user_id
        );
        self.repository
            .delete_payment_method(user_id, payment_method_id)
            .await
    }
}
