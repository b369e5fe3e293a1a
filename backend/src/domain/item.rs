//! Monitoring Item Entity
//!
//! A single monitored indicator inside a business area.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult};

/// Health of an indicator
///
/// Serialized with the labels used throughout stored data and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Hijau")]
    Green,
    #[serde(rename = "Kuning")]
    Yellow,
    #[serde(rename = "Merah")]
    Red,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Green, Status::Yellow, Status::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Green => "Hijau",
            Status::Yellow => "Kuning",
            Status::Red => "Merah",
        }
    }

    /// Exact label match only
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Hijau" => Some(Status::Green),
            "Kuning" => Some(Status::Yellow),
            "Merah" => Some(Status::Red),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::from_label(s).ok_or_else(|| {
            DomainError::Validation(format!(
                "status must be one of Hijau, Kuning, Merah (got {:?})",
                s
            ))
        })
    }
}

/// A monitoring record as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringItem {
    /// Unique across the whole store, never changes after creation
    pub id: String,
    pub area: String,
    pub sub_area: String,
    #[serde(default)]
    pub indicator: String,
    pub status: Status,
    /// `YYYY-MM-DD`, compared as a plain string
    #[serde(default)]
    pub last_update: String,
    /// Person in charge
    #[serde(default)]
    pub pic: String,
    #[serde(default)]
    pub notes: String,
}

impl MonitoringItem {
    /// Build a stored item from validated boundary fields
    pub fn from_fields(id: String, fields: ItemFields) -> DomainResult<Self> {
        let status = fields.validate()?;
        Ok(Self {
            id,
            area: fields.area,
            sub_area: fields.sub_area,
            indicator: fields.indicator,
            status,
            last_update: fields.last_update,
            pic: fields.pic,
            notes: fields.notes,
        })
    }

    /// The item's fields without its id
    pub fn fields(&self) -> ItemFields {
        ItemFields {
            area: self.area.clone(),
            sub_area: self.sub_area.clone(),
            indicator: self.indicator.clone(),
            status: self.status.as_str().to_string(),
            last_update: self.last_update.clone(),
            pic: self.pic.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// An item without an id, as submitted by a form or command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFields {
    pub area: String,
    pub sub_area: String,
    pub indicator: String,
    pub status: String,
    pub last_update: String,
    pub pic: String,
    pub notes: String,
}

impl ItemFields {
    /// Presence checks on `area`, `subArea` and `status`, plus the status label
    pub fn validate(&self) -> DomainResult<Status> {
        require("area", &self.area)?;
        require("subArea", &self.sub_area)?;
        require("status", &self.status)?;
        self.status.parse()
    }
}

pub(crate) fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ItemFields {
        ItemFields {
            area: "Finance & Legal".to_string(),
            sub_area: "Cash Flow".to_string(),
            indicator: "Arus kas positif".to_string(),
            status: "Hijau".to_string(),
            last_update: "2025-01-15".to_string(),
            pic: "Finance Lead".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_item_creation() {
        let item = MonitoringItem::from_fields("abc".to_string(), fields()).unwrap();
        assert_eq!(item.id, "abc");
        assert_eq!(item.status, Status::Green);
        assert_eq!(item.fields(), fields());
    }

    #[test]
    fn test_missing_required_fields() {
        let mut f = fields();
        f.sub_area = String::new();
        assert!(matches!(f.validate(), Err(DomainError::Validation(_))));

        let mut f = fields();
        f.status = "  ".to_string();
        assert!(matches!(f.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_blank_text_counts_as_present() {
        let mut f = fields();
        f.sub_area = " ".to_string();
        assert_eq!(f.validate(), Ok(Status::Green));
        assert!(require("subArea", " ").is_ok());
        assert!(require("subArea", "").is_err());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut f = fields();
        f.status = "Green".to_string();
        assert!(f.validate().is_err());
        assert!(MonitoringItem::from_fields("x".to_string(), f).is_err());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&Status::Yellow).unwrap(), "\"Kuning\"");
        assert_eq!("Merah".parse::<Status>().unwrap(), Status::Red);
    }

    #[test]
    fn test_item_json_shape() {
        let item = MonitoringItem::from_fields("id1".to_string(), fields()).unwrap();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["subArea"], "Cash Flow");
        assert_eq!(value["lastUpdate"], "2025-01-15");
        assert_eq!(value["status"], "Hijau");
    }
}
