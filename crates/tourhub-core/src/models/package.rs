//! Tour package domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Uuid,
    /// Category tag, e.g. `"hiking"` or `"sports"`.
    #[serde(rename = "type")]
    pub package_type: String,
    pub title: String,
    pub price: f64,
    pub thumbnail: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackage {
    #[serde(rename = "type")]
    pub package_type: String,
    pub title: String,
    pub price: f64,
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackage {
    #[serde(rename = "type")]
    pub package_type: Option<String>,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
}

/// One entry of the aggregated package type list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PackageTypeSummary {
    #[serde(rename = "type")]
    pub package_type: String,
    pub thumbnail: String,
}
