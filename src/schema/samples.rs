//! The three forms shipped with the binary when no schema file is given.

use super::SchemaRegistry;
use crate::core::{EntitySchema, FieldDescriptor, FieldKind, Result};

pub const USER_INFORMATION: &str = "User Information";
pub const ADDRESS_INFORMATION: &str = "Address Information";
pub const PAYMENT_INFORMATION: &str = "Payment Information";

pub fn sample_schemas() -> Vec<EntitySchema> {
    vec![
        EntitySchema::new(
            USER_INFORMATION,
            vec![
                FieldDescriptor::new("firstName", "First Name", FieldKind::Text).required(),
                FieldDescriptor::new("lastName", "Last Name", FieldKind::Text).required(),
                FieldDescriptor::new("age", "Age", FieldKind::Number),
            ],
        ),
        EntitySchema::new(
            ADDRESS_INFORMATION,
            vec![
                FieldDescriptor::new("street", "Street", FieldKind::Text).required(),
                FieldDescriptor::new("city", "City", FieldKind::Text).required(),
                FieldDescriptor::new(
                    "state",
                    "State",
                    FieldKind::choice(["Kerala", "Tamil Nadu", "Karnataka", "Goa", "Other"]),
                )
                .required(),
                FieldDescriptor::new("zipCode", "Pin code", FieldKind::Number).required(),
            ],
        ),
        EntitySchema::new(
            PAYMENT_INFORMATION,
            vec![
                FieldDescriptor::new("cardNumber", "Card Number", FieldKind::Number).required(),
                FieldDescriptor::new("expiryDate", "Expiry Date", FieldKind::Date).required(),
                FieldDescriptor::new("cvv", "CVV", FieldKind::Secret).required(),
                FieldDescriptor::new("cardholderName", "Cardholder Name", FieldKind::Text)
                    .required(),
            ],
        ),
    ]
}

pub fn sample_registry() -> Result<SchemaRegistry> {
    SchemaRegistry::new(sample_schemas())
}
