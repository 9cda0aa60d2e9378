//! SQLite storage implementation for payment methods.

mod model;
mod repository;

pub use model::PaymentMethodDB;
pub use repository::PaymentMethodRepository;
