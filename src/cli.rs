use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::adapters::outbound::network::GitHubClient;
use crate::application::dto::{OutputFormat, RunRequest};
use crate::application::use_cases::PipelineSettings;
use crate::component_history::domain::{AccessToken, PathTemplate, Repository};
use crate::component_history::policies::ColumnPriority;
use crate::component_history::services::ScriptParser;
use crate::config::ConfigFile;
use crate::shared::Result;

pub const DEFAULT_REPOSITORY: &str = "bitnami/containers";
pub const DEFAULT_STATE_FILE: &str = ".component-history/state.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Track component versions across the commit history of a Dockerfile
#[derive(Parser, Debug)]
#[command(name = "component-history")]
#[command(version)]
#[command(
    about = "Track component versions across the commit history of a Dockerfile",
    long_about = None
)]
pub struct Args {
    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Application version filling the {version} placeholder [default: 4.1]
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,

    /// OS flavor filling the {flavor} placeholder [default: debian-12]
    #[arg(long, value_name = "FLAVOR")]
    pub os_flavor: Option<String>,

    /// Repository holding the Dockerfile [default: bitnami/containers]
    #[arg(long, value_name = "OWNER/NAME")]
    pub repository: Option<String>,

    /// Base URL of the GitHub REST API [default: https://api.github.com]
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to a config file (defaults to ./component-history.config.yml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// File the filter selection is persisted to [default: .component-history/state.json]
    #[arg(long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Keep the filter selection in memory only
    #[arg(long, conflicts_with = "state_file")]
    pub no_persist: bool,

    /// Output format: markdown or json [default: markdown]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Select a value for a filter dimension; repeat to select several
    /// values, e.g. --select IMAGE_VERSION=4.1.2 --select IMAGE_VERSION=4.1.3
    #[arg(long = "select", value_name = "DIM=VALUE", value_parser = parse_selection_arg)]
    pub select: Vec<(String, String)>,

    /// Clear the selection of a filter dimension
    #[arg(long = "clear", value_name = "DIM")]
    pub clear: Vec<String>,

    /// Print the available filter values instead of the table
    #[arg(long)]
    pub list_options: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Selection updates in the order they apply: cleared dimensions
    /// first, then one replacement per selected dimension
    pub fn selection_updates(&self) -> Vec<(String, Vec<String>)> {
        let mut updates: Vec<(String, Vec<String>)> = self
            .clear
            .iter()
            .map(|dimension| (dimension.clone(), Vec::new()))
            .collect();

        let mut selected: Vec<(String, Vec<String>)> = Vec::new();
        for (dimension, value) in &self.select {
            match selected.iter_mut().find(|(d, _)| d == dimension) {
                Some((_, values)) => values.push(value.clone()),
                None => selected.push((dimension.clone(), vec![value.clone()])),
            }
        }
        updates.extend(selected);
        updates
    }
}

fn parse_selection_arg(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((dimension, value)) if !dimension.trim().is_empty() => {
            Ok((dimension.trim().to_string(), value.to_string()))
        }
        _ => Err(format!(
            "Invalid selection '{}'. Expected DIM=VALUE, e.g. IMAGE_VERSION=4.1.2",
            raw
        )),
    }
}

/// Effective settings after merging flags, config file and defaults
#[derive(Debug)]
pub struct Settings {
    pub repository: Repository,
    pub api_url: String,
    pub timeout_secs: u64,
    pub state_file: Option<PathBuf>,
    pub format: OutputFormat,
    pub request: RunRequest,
    pub pipeline: PipelineSettings,
}

impl Settings {
    /// Flag value first, then config file, then built-in default
    ///
    /// # Errors
    /// Returns an error if the repository coordinates are malformed
    pub fn resolve(args: &Args, config: ConfigFile) -> Result<Self> {
        let repository: Repository = args
            .repository
            .as_deref()
            .or(config.repository.as_deref())
            .unwrap_or(DEFAULT_REPOSITORY)
            .parse()?;

        let api_url = args
            .api_url
            .clone()
            .or(config.api_url)
            .unwrap_or_else(|| GitHubClient::DEFAULT_API_URL.to_string());

        let state_file = if args.no_persist {
            None
        } else {
            Some(
                args.state_file
                    .clone()
                    .or(config.state_file)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
            )
        };

        let request = RunRequest::new(
            AccessToken::new(args.token.clone()),
            args.app_version
                .clone()
                .or(config.app_version)
                .unwrap_or_else(|| RunRequest::DEFAULT_APP_VERSION.to_string()),
            args.os_flavor
                .clone()
                .or(config.os_flavor)
                .unwrap_or_else(|| RunRequest::DEFAULT_OS_FLAVOR.to_string()),
        );

        let defaults = PipelineSettings::default();
        let pipeline = PipelineSettings {
            path_template: config
                .path_template
                .map(PathTemplate::new)
                .unwrap_or(defaults.path_template),
            parser: ScriptParser::new(
                config
                    .arch_placeholder
                    .unwrap_or_else(|| ScriptParser::DEFAULT_ARCH_PLACEHOLDER.to_string()),
                config
                    .arch
                    .unwrap_or_else(|| ScriptParser::DEFAULT_ARCH.to_string()),
            ),
            priority: config
                .prioritized_columns
                .map(ColumnPriority::new)
                .unwrap_or(defaults.priority),
            dimensions: config.dimensions.unwrap_or(defaults.dimensions),
        };

        Ok(Self {
            repository,
            api_url,
            timeout_secs: config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            state_file,
            format: args.format.or(config.format).unwrap_or_default(),
            request,
            pipeline,
        })
    }
}
