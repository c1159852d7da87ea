use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use serde::Serialize;
use serde_json::Value;

use superset_explore::client::{RequestParams, SupersetClient};
use superset_explore::conf::Config;
use superset_explore::core::{CliArgs, Command, setup_logging};
use superset_explore::explore::{
    ChartDataRequest, ChartMetadataRegistry, get_chart_data_request, get_query_settings,
    handle_chart_data_response, post_form_data, put_form_data, read_form_data,
};
use superset_explore::filter::{BinaryFilterClause, simple_filter_to_adhoc};

#[tokio::main]
async fn main() {
    setup_logging();
    let args = CliArgs::parse();
    info!(args = args; "superset-explore started");

    if let Err(err) = run(args).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(Path::new(path))?,
        None => Config::default(),
    };

    match args.command {
        Command::ChartData { form_data, force } => {
            let client = SupersetClient::new(&config.client)?;
            let form_data = read_form_data(&form_data).await?;
            let registry = ChartMetadataRegistry::from(&config.charts);
            let settings = get_query_settings(&registry, &form_data);
            let params = RequestParams {
                endpoint: Some(config.endpoints.chart_data.clone()),
                parse_method: Some(settings.parse_method),
                ..Default::default()
            };
            let request = ChartDataRequest::new(form_data)
                .force(force)
                .request_params(params);

            let response = get_chart_data_request(&client, request).await?;
            match handle_chart_data_response(&response.json, settings.use_legacy_api) {
                Some(result) => print_json(result),
                None => print_json(&response.json),
            }
        }
        Command::ExploreJson {
            form_data,
            put,
            endpoint,
        } => {
            let client = SupersetClient::new(&config.client)?;
            let form_data = read_form_data(&form_data).await?;
            let endpoint = endpoint.unwrap_or(config.endpoints.explore_json);

            let response = if put {
                put_form_data(&client, &form_data, Some(endpoint.as_str())).await?
            } else {
                post_form_data(&client, &form_data, Some(endpoint.as_str())).await?
            };
            print_json(&response.json.unwrap_or(Value::Null))
        }
        Command::ToAdhoc { filter } => {
            let clause: BinaryFilterClause =
                serde_json::from_str(&filter).context("parsing filter clause")?;
            print_json(&simple_filter_to_adhoc(&clause))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
