//! Per-resource options.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Options for one registered resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceOptions {
    /// Property used as the display title and search field. When unset the
    /// resource picks one from its properties.
    #[serde(default)]
    pub title_property: Option<String>,

    /// Property holding the record id (in-memory resources only).
    #[serde(default)]
    pub id_property: Option<String>,

    /// Reference properties: property path -> referenced resource id.
    #[serde(default)]
    pub references: BTreeMap<String, String>,

    /// Seed records for in-memory resources.
    #[serde(default)]
    pub records: Vec<Map<String, Value>>,
}
