use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ParseMethod;
use crate::conf::ChartsConfig;

use super::FormData;

/// Per visualization type response-handling hints. Missing fields mean the
/// registry has no opinion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChartMetadata {
    #[serde(default)]
    pub use_legacy_api: Option<bool>,
    #[serde(default)]
    pub parse_method: Option<ParseMethod>,
}

#[derive(Debug, Clone, Default)]
pub struct ChartMetadataRegistry {
    entries: HashMap<String, ChartMetadata>,
}

impl ChartMetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, viz_type: impl Into<String>, metadata: ChartMetadata) -> &mut Self {
        self.entries.insert(viz_type.into(), metadata);
        self
    }

    pub fn get(&self, viz_type: &str) -> Option<&ChartMetadata> {
        self.entries.get(viz_type)
    }

    pub fn remove(&mut self, viz_type: &str) -> Option<ChartMetadata> {
        self.entries.remove(viz_type)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl From<&ChartsConfig> for ChartMetadataRegistry {
    fn from(charts: &ChartsConfig) -> Self {
        Self {
            entries: charts.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuerySettings {
    pub use_legacy_api: bool,
    pub parse_method: ParseMethod,
}

impl From<QuerySettings> for (bool, &'static str) {
    fn from(settings: QuerySettings) -> Self {
        (settings.use_legacy_api, settings.parse_method.as_str())
    }
}

/// Resolves settings for `form_data["viz_type"]`, falling back to
/// `(false, json-bigint)` field by field.
pub fn get_query_settings(registry: &ChartMetadataRegistry, form_data: &FormData) -> QuerySettings {
    let metadata = form_data
        .get("viz_type")
        .and_then(Value::as_str)
        .and_then(|viz_type| registry.get(viz_type));

    QuerySettings {
        use_legacy_api: metadata.and_then(|m| m.use_legacy_api).unwrap_or(false),
        parse_method: metadata.and_then(|m| m.parse_method).unwrap_or_default(),
    }
}
