//! Checkout form data and the simulated submission flow.
//!
//! The flow is a three-phase state machine:
//!
//! ```text
//! Editing --begin_submission--> Submitting --complete--> Submitted
//! ```
//!
//! While `Submitting`, the submit control is disabled and further
//! submissions are refused. Once started, a submission cannot fail.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Email, EmailError, Price};

/// Errors raised while filling in or submitting the checkout form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The field name does not belong to the form.
    #[error("unknown form field: {0}")]
    UnknownField(String),

    /// A select input received a value outside its options.
    #[error("invalid value for {field}: {value}")]
    InvalidChoice { field: &'static str, value: String },

    /// A required field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email field does not hold an email address.
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A submission is already in flight.
    #[error("submission already in progress")]
    AlreadySubmitting,

    /// `complete` was called without a submission in flight.
    #[error("no submission in progress")]
    NotSubmitting,
}

/// Shipping method selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
}

impl ShippingMethod {
    pub const ALL: [Self; 2] = [Self::Standard, Self::Express];

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard Shipping",
            Self::Express => "Express Shipping",
        }
    }

    /// Delivery estimate shown under the label.
    #[must_use]
    pub const fn estimate(self) -> &'static str {
        match self {
            Self::Standard => "3-5 business days",
            Self::Express => "1-2 business days",
        }
    }

    #[must_use]
    pub fn price(self) -> Price {
        match self {
            Self::Standard => Price::usd(5),
            Self::Express => Price::usd(15),
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| CheckoutError::InvalidChoice {
                field: "shippingMethod",
                value: s.to_string(),
            })
    }
}

/// Destination country options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Country {
    #[default]
    US,
    UK,
    CA,
    AU,
}

impl Country {
    pub const ALL: [Self; 4] = [Self::US, Self::UK, Self::CA, Self::AU];

    /// Form value, e.g. `US`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::US => "US",
            Self::UK => "UK",
            Self::CA => "CA",
            Self::AU => "AU",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::US => "United States",
            Self::UK => "United Kingdom",
            Self::CA => "Canada",
            Self::AU => "Australia",
        }
    }
}

impl FromStr for Country {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|country| country.code() == s)
            .ok_or_else(|| CheckoutError::InvalidChoice {
                field: "country",
                value: s.to_string(),
            })
    }
}

/// Shipping details collected on the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: Country,
    pub shipping_method: ShippingMethod,
}

impl CheckoutForm {
    /// Set one field by its HTML input name.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownField`] for names outside the form and
    /// [`CheckoutError::InvalidChoice`] for bad select values.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), CheckoutError> {
        let slot = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "postalCode" => &mut self.postal_code,
            "country" => {
                self.country = value.parse()?;
                return Ok(());
            }
            "shippingMethod" => {
                self.shipping_method = value.parse()?;
                return Ok(());
            }
            _ => return Err(CheckoutError::UnknownField(name.to_string())),
        };
        value.clone_into(slot);
        Ok(())
    }

    /// Required text fields paired with their input names, in page order.
    fn required_fields(&self) -> [(&'static str, &str); 7] {
        [
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("postalCode", self.postal_code.as_str()),
        ]
    }

    /// Check the constraints a browser would enforce before submitting.
    ///
    /// # Errors
    ///
    /// Returns the first empty required field, then any email problem. Like
    /// the `required` attribute, a value of only spaces counts as filled.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if let Some((name, _)) = self
            .required_fields()
            .into_iter()
            .find(|(_, value)| value.is_empty())
        {
            return Err(CheckoutError::MissingField(name));
        }
        Email::parse(&self.email)?;
        Ok(())
    }
}

/// Where the checkout flow currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

/// Checkout screen state: the form plus the submission phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFlow {
    pub form: CheckoutForm,
    pub phase: CheckoutPhase,
}

impl CheckoutFlow {
    /// Validate the form and enter the submitting phase.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadySubmitting`] while a submission is in
    /// flight, or the validation error. The phase is unchanged on error.
    pub fn begin_submission(&mut self) -> Result<(), CheckoutError> {
        if self.phase == CheckoutPhase::Submitting {
            return Err(CheckoutError::AlreadySubmitting);
        }
        self.form.validate()?;
        self.phase = CheckoutPhase::Submitting;
        Ok(())
    }

    /// Finish the in-flight submission.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotSubmitting`] if no submission was started.
    pub fn complete(&mut self) -> Result<(), CheckoutError> {
        if self.phase != CheckoutPhase::Submitting {
            return Err(CheckoutError::NotSubmitting);
        }
        self.phase = CheckoutPhase::Submitted;
        Ok(())
    }

    /// Whether the submit control is disabled.
    #[must_use]
    pub fn submit_disabled(&self) -> bool {
        self.phase == CheckoutPhase::Submitting
    }
}
