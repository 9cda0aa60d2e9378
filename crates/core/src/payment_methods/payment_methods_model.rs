//! Payment method domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ACCOUNT_NUMBER_LEN, MAX_PAYMENT_METHOD_NAME_LEN};
use crate::errors::{Error, Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
    Upi,
    Wallet,
    Other,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "cash",
            PaymentType::CreditCard => "credit_card",
            PaymentType::DebitCard => "debit_card",
            PaymentType::BankTransfer => "bank_transfer",
            PaymentType::Upi => "upi",
            PaymentType::Wallet => "wallet",
            PaymentType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::CreditCard => "Credit Card",
            PaymentType::DebitCard => "Debit Card",
            PaymentType::BankTransfer => "Bank Transfer",
            PaymentType::Upi => "UPI",
            PaymentType::Wallet => "Digital Wallet",
            PaymentType::Other => "Other",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cash" => Ok(PaymentType::Cash),
            "credit_card" => Ok(PaymentType::CreditCard),
            "debit_card" => Ok(PaymentType::DebitCard),
            "bank_transfer" => Ok(PaymentType::BankTransfer),
            "upi" => Ok(PaymentType::Upi),
            "wallet" => Ok(PaymentType::Wallet),
            "other" => Ok(PaymentType::Other),
            other => Err(Error::invalid_input(format!(
                "Unknown payment type '{}'",
                other
            ))),
        }
    }
}

/// A card, account or wallet a user pays with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub payment_type: PaymentType,
    /// Last digits or a partial number, never the full one
    pub account_number: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl PaymentMethod {
    /// e.g. `Travel card (Credit Card)`
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.payment_type.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentMethod {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub payment_type: PaymentType,
    pub account_number: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodUpdate {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub payment_type: PaymentType,
    pub account_number: Option<String>,
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

fn validate_fields(
    name: &str,
    account_number: Option<&str>,
) -> std::result::Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("name".to_string()));
    }
    if trimmed.chars().count() > MAX_PAYMENT_METHOD_NAME_LEN {
        return Err(ValidationError::InvalidInput(format!(
            "Payment method name cannot exceed {} characters",
            MAX_PAYMENT_METHOD_NAME_LEN
        )));
    }
    if account_number.map_or(false, |n| n.chars().count() > MAX_ACCOUNT_NUMBER_LEN) {
        return Err(ValidationError::InvalidInput(format!(
            "Account number cannot exceed {} characters",
            MAX_ACCOUNT_NUMBER_LEN
        )));
    }
    Ok(())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl NewPaymentMethod {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        validate_fields(&self.name, self.account_number.as_deref())?;
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.account_number = blank_to_none(self.account_number);
        self
    }
}

impl PaymentMethodUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        validate_fields(&self.name, self.account_number.as_deref())?;
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.account_number = blank_to_none(self.account_number);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_method(name: &str, account_number: Option<&str>) -> NewPaymentMethod {
        NewPaymentMethod {
            id: None,
            user_id: "alice".to_string(),
            name: name.to_string(),
            payment_type: PaymentType::CreditCard,
            account_number: account_number.map(str::to_string),
            is_active: true,
        }
    }

    #[test]
    fn test_payment_type_round_trips_through_str() {
        for kind in [
            PaymentType::Cash,
            PaymentType::CreditCard,
            PaymentType::DebitCard,
            PaymentType::BankTransfer,
            PaymentType::Upi,
            PaymentType::Wallet,
            PaymentType::Other,
        ] {
            assert_eq!(kind.as_str().parse::<PaymentType>().unwrap(), kind);
        }
        assert!("cheque".parse::<PaymentType>().is_err());
        assert_eq!(
            serde_json::to_string(&PaymentType::BankTransfer).unwrap(),
            "\"bank_transfer\""
        );
    }

    #[test]
    fn test_validate_rules() {
        assert!(new_method("Visa", Some("4242")).validate().is_ok());
        assert!(new_method("  ", None).validate().is_err());
        assert!(new_method(&"x".repeat(101), None).validate().is_err());
        assert!(new_method("Visa", Some(&"9".repeat(101))).validate().is_err());
    }

    #[test]
    fn test_normalized_trims_and_drops_blank_account_number() {
        let method = new_method(" Visa ", Some("  ")).normalized();
        assert_eq!(method.name, "Visa");
        assert_eq!(method.account_number, None);
    }
}
