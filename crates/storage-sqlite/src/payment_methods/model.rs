//! Database model for payment methods.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use finflow_core::errors::Error;
use finflow_core::payment_methods::{NewPaymentMethod, PaymentMethod, PaymentMethodUpdate};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::payment_methods)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct PaymentMethodDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub payment_type: String,
    pub account_number: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl PaymentMethodDB {
    pub fn apply(&mut self, update: PaymentMethodUpdate) {
        self.name = update.name;
        self.payment_type = update.payment_type.as_str().to_string();
        self.account_number = update.account_number;
        self.is_active = update.is_active;
    }
}

impl TryFrom<PaymentMethodDB> for PaymentMethod {
    type Error = Error;

    fn try_from(db: PaymentMethodDB) -> Result<Self, Self::Error> {
        Ok(Self {
            payment_type: db.payment_type.parse()?,
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            account_number: db.account_number,
            is_active: db.is_active,
            created_at: db.created_at,
        })
    }
}

impl From<NewPaymentMethod> for PaymentMethodDB {
    fn from(domain: NewPaymentMethod) -> Self {
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            user_id: domain.user_id,
            name: domain.name,
            payment_type: domain.payment_type.as_str().to_string(),
            account_number: domain.account_number,
            is_active: domain.is_active,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
