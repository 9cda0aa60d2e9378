//! Payment methods module - domain models, services, and traits.

mod payment_methods_model;
mod payment_methods_service;
mod payment_methods_traits;

pub use payment_methods_model::{
    NewPaymentMethod, PaymentMethod, PaymentMethodUpdate, PaymentType,
};
pub use payment_methods_service::PaymentMethodService;
pub use payment_methods_traits::{PaymentMethodRepositoryTrait, PaymentMethodServiceTrait};
