use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::kv::{ToValue, Value};

#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
pub struct CliArgs {
    #[arg(short, long)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Request chart data for a form data JSON file.
    ChartData {
        #[arg(long)]
        form_data: PathBuf,
        #[arg(long)]
        force: bool,
    },
    /// Submit form data to the legacy explore_json endpoint.
    ExploreJson {
        #[arg(long)]
        form_data: PathBuf,
        /// Use PUT instead of POST.
        #[arg(long)]
        put: bool,
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Convert a `{col, op, val}` filter clause into an adhoc filter.
    ToAdhoc {
        #[arg(long)]
        filter: String,
    },
}

impl ToValue for CliArgs {
    fn to_value(&self) -> Value<'_> {
        Value::from_debug(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = CliArgs::parse_from([
            "self",
            "--config",
            "foo",
            "chart-data",
            "--form-data",
            "form.json",
            "--force",
        ]);
        assert_eq!(
            args,
            CliArgs {
                config: Some("foo".to_string()),
                command: Command::ChartData {
                    form_data: PathBuf::from("form.json"),
                    force: true,
                },
            }
        );
    }

    #[test]
    fn test_explore_json_defaults_to_post() {
        let args = CliArgs::parse_from(["self", "explore-json", "--form-data", "f.json"]);
        assert_eq!(args.config, None);
        assert_eq!(
            args.command,
            Command::ExploreJson {
                form_data: PathBuf::from("f.json"),
                put: false,
                endpoint: None,
            }
        );
    }
}
