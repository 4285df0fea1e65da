//! Request DTOs for the inventory API
//!
//! Every field is optional at the serde level so that missing or malformed
//! values surface as per-field validation messages rather than a bare
//! deserialization failure.

use serde::Deserialize;

use crate::error::FieldErrors;
use crate::models::Price;
use crate::store::{ItemChanges, NewItem};

/// Longest accepted item name, in characters.
pub const NAME_MAX_LENGTH: usize = 255;

const REQUIRED: &str = "This field is required.";

/// Text field as sent by a client. Numbers are taken as their decimal text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl TextInput {
    fn parse(self) -> Result<String, String> {
        match self {
            TextInput::Text(text) => Ok(text),
            TextInput::Number(number) => Ok(number.to_string()),
            TextInput::Other(_) => Err("Not a valid string.".to_string()),
        }
    }
}

impl From<&str> for TextInput {
    fn from(text: &str) -> Self {
        TextInput::Text(text.to_string())
    }
}

/// Quantity as sent by a client: `10` or `"10"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Integer(i64),
    Text(String),
    Other(serde_json::Value),
}

impl QuantityInput {
    fn parse(&self) -> Result<i64, String> {
        let parsed = match self {
            QuantityInput::Integer(quantity) => Some(*quantity),
            QuantityInput::Text(text) => text.trim().parse().ok(),
            QuantityInput::Other(_) => None,
        };
        parsed.ok_or_else(|| "A valid integer is required.".to_string())
    }
}

impl From<i64> for QuantityInput {
    fn from(quantity: i64) -> Self {
        QuantityInput::Integer(quantity)
    }
}

/// Price as sent by a client: either `"9.99"` or `9.99`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl PriceInput {
    fn parse(&self) -> Result<Price, String> {
        match self {
            PriceInput::Text(text) => Price::parse(text),
            PriceInput::Number(number) => Price::parse(&number.to_string()),
            PriceInput::Other(_) => Err("A valid number is required.".to_string()),
        }
    }
}

impl From<&str> for PriceInput {
    fn from(text: &str) -> Self {
        PriceInput::Text(text.to_string())
    }
}

/// Body of `POST`, `PUT` and `PATCH` on the items collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRequest {
    #[serde(default)]
    pub name: Option<TextInput>,
    #[serde(default)]
    pub description: Option<TextInput>,
    #[serde(default)]
    pub quantity: Option<QuantityInput>,
    #[serde(default)]
    pub price: Option<PriceInput>,
}

impl ItemRequest {
    /// Validates a complete item (create and full update).
    pub fn into_new_item(self) -> Result<NewItem, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.is_none() {
            push(&mut errors, "name", REQUIRED);
        }
        if self.quantity.is_none() {
            push(&mut errors, "quantity", REQUIRED);
        }
        if self.price.is_none() {
            push(&mut errors, "price", REQUIRED);
        }

        let changes = self.validate_present(&mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        match changes {
            ItemChanges {
                name: Some(name),
                description,
                quantity: Some(quantity),
                price: Some(price),
            } => Ok(NewItem {
                name,
                description: description.unwrap_or_default(),
                quantity,
                price,
            }),
            _ => Err(errors),
        }
    }

    /// Validates only the fields that were supplied (partial update).
    pub fn into_changes(self) -> Result<ItemChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let changes = self.validate_present(&mut errors);
        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }

    fn validate_present(self, errors: &mut FieldErrors) -> ItemChanges {
        let name = self.name.and_then(|name| {
            let name = match name.parse() {
                Ok(name) => name.trim().to_string(),
                Err(message) => {
                    push(errors, "name", message);
                    return None;
                }
            };
            if name.is_empty() {
                push(errors, "name", "This field may not be blank.");
                None
            } else if name.chars().count() > NAME_MAX_LENGTH {
                push(
                    errors,
                    "name",
                    format!(
                        "Ensure this field has no more than {} characters.",
                        NAME_MAX_LENGTH
                    ),
                );
                None
            } else {
                Some(name)
            }
        });

        let quantity = self.quantity.and_then(|quantity| match quantity.parse() {
            Ok(quantity) => match u64::try_from(quantity) {
                Ok(quantity) => Some(quantity),
                Err(_) => {
                    push(errors, "quantity", "Ensure this value is greater than or equal to 0.");
                    None
                }
            },
            Err(message) => {
                push(errors, "quantity", message);
                None
            }
        });

        let price = self.price.and_then(|price| match price.parse() {
            Ok(price) => Some(price),
            Err(message) => {
                push(errors, "price", message);
                None
            }
        });

        let description = self.description.and_then(|description| match description.parse() {
            Ok(description) => Some(description),
            Err(message) => {
                push(errors, "description", message);
                None
            }
        });

        ItemChanges {
            name,
            description,
            quantity,
            price,
        }
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}
