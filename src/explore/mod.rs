//! Explore-side requests: form data submission, chart data and the
//! per-visualization settings that decide how responses are read.

mod chart_data;
mod form_data;
mod query_settings;

pub use chart_data::{
    CHART_DATA_ENDPOINT, ChartDataBody, ChartDataPayload, ChartDataRequest, ChartDataResponse,
    get_chart_data_request, handle_chart_data_response,
};
pub use form_data::{
    EXPLORE_JSON_ENDPOINT, FormData, TEMPORARY_CONTROLS, post_form_data, put_form_data,
    read_form_data, sanitize_form_data,
};
pub use query_settings::{ChartMetadata, ChartMetadataRegistry, QuerySettings, get_query_settings};
