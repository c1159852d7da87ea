use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default = "ClientConfig::default_base_url")]
    pub base_url: String,
    #[serde(with = "humantime_serde", default = "ClientConfig::default_timeout")]
    pub timeout: Duration,
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ClientConfig {
    fn default_base_url() -> String {
        String::from("http://localhost:8088")
    }

    fn default_timeout() -> Duration {
        Duration::from_secs(60)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Self::default_timeout(),
            csrf_token: None,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    #[serde(default = "EndpointConfig::default_chart_data")]
    pub chart_data: String,
    #[serde(default = "EndpointConfig::default_explore_json")]
    pub explore_json: String,
}

impl EndpointConfig {
    fn default_chart_data() -> String {
        String::from(crate::explore::CHART_DATA_ENDPOINT)
    }

    fn default_explore_json() -> String {
        String::from(crate::explore::EXPLORE_JSON_ENDPOINT)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            chart_data: Self::default_chart_data(),
            explore_json: Self::default_explore_json(),
        }
    }
}
