mod client;
mod config;

use std::collections::HashMap;

use crate::explore::ChartMetadata;

pub use client::{ClientConfig, EndpointConfig};
pub use config::Config;

/// Chart metadata keyed by visualization type.
pub type ChartsConfig = HashMap<String, ChartMetadata>;
