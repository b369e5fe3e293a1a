//! Untrusted import records
//!
//! Whatever arrives in an import file is held as a `RawItem` until every
//! field has been checked. Only validated `ItemFields` reach the snapshot.

use serde_json::{Map, Value};

use super::entity::{DomainError, DomainResult};
use super::item::{require, ItemFields, Status};

#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    fields: Map<String, Value>,
}

impl RawItem {
    /// Wrap one element of an import array; it must be a JSON object
    pub fn from_value(value: Value) -> DomainResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DomainError::Validation(format!(
                "expected an object, got {}",
                type_name(&other)
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Check field by field and produce boundary fields
    ///
    /// `area`, `subArea` and `status` must be non-empty strings and the status
    /// a known label. The remaining text fields may be missing or null.
    pub fn validate(&self) -> DomainResult<ItemFields> {
        let area = self.required_text("area")?;
        let sub_area = self.required_text("subArea")?;
        let status = self.required_text("status")?;
        Status::from_label(&status).ok_or_else(|| {
            DomainError::Validation(format!("unknown status {:?}", status))
        })?;

        Ok(ItemFields {
            area,
            sub_area,
            indicator: self.optional_text("indicator")?,
            status,
            last_update: self.optional_text("lastUpdate")?,
            pic: self.optional_text("pic")?,
            notes: self.optional_text("notes")?,
        })
    }

    fn required_text(&self, key: &str) -> DomainResult<String> {
        let text = self.optional_text(key)?;
        require(key, &text)?;
        Ok(text)
    }

    fn optional_text(&self, key: &str) -> DomainResult<String> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(DomainError::Validation(format!(
                "{} must be a string, got {}",
                key,
                type_name(other)
            ))),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
