use component_history::application::factories::{
    FormatterFactory, PresenterFactory, PresenterType,
};
use component_history::cli::{Args, Settings};
use component_history::config::{
    discover_config, load_config_from_path, ConfigFile, CONFIG_FILENAME,
};
use component_history::prelude::*;
use component_history::shared::error::ExitCode;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

/// Log level follows `-v`; `RUST_LOG` takes precedence when set
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    match &args.config {
        Some(path) => load_config_from_path(path),
        None => {
            let current_dir = std::env::current_dir()?;
            let discovered = discover_config(&current_dir)?;
            if discovered.is_some() {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    current_dir.join(CONFIG_FILENAME).display()
                );
            }
            Ok(discovered.unwrap_or_default())
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let settings = Settings::resolve(&args, config)?;
    log::debug!("Resolved settings: {:?}", settings);

    // Create adapters (Dependency Injection)
    let client = GitHubClient::with_options(
        settings.repository.clone(),
        &settings.api_url,
        Duration::from_secs(settings.timeout_secs),
    )?;
    log::info!(
        "Reading history of {} from {}",
        client.repository(),
        settings.api_url
    );
    let progress_reporter = StderrProgressReporter::new();

    match settings.state_file.clone() {
        Some(path) => {
            let store = FileSelectionStore::new(path);
            execute(&args, settings, client, store, progress_reporter).await
        }
        None => {
            let store = InMemorySelectionStore::new();
            execute(&args, settings, client, store, progress_reporter).await
        }
    }
}

async fn execute<S: SelectionStore>(
    args: &Args,
    settings: Settings,
    client: GitHubClient,
    store: S,
    progress_reporter: StderrProgressReporter,
) -> Result<()> {
    let pipeline = ComponentPipeline::with_settings(
        client.clone(),
        client,
        store,
        progress_reporter,
        settings.pipeline,
    )?;

    // Selection changes are persisted before the run so they survive a failed fetch
    for (dimension, values) in args.selection_updates() {
        pipeline.update_selection(&dimension, values)?;
    }

    let summary = pipeline.run(settings.request).await?;
    log::info!("Run finished: {}", summary);
    if summary.is_partial() {
        eprintln!(
            "⚠️  {} revision(s) could not be loaded; the table is incomplete.",
            summary.failed
        );
    }

    let view = HistoryView::from_snapshot(pipeline.snapshot());
    let content = if args.list_options {
        render_filter_options(&view)
    } else {
        eprintln!("{}", FormatterFactory::progress_message(settings.format));
        FormatterFactory::create(settings.format).format(&view)?
    };

    let presenter = PresenterFactory::create(PresenterType::from(args.output.clone()));
    presenter.present(&content)
}

/// One line per dimension: `DIM: value, value` with selected values marked
fn render_filter_options(view: &HistoryView) -> String {
    let mut output = String::new();
    for set in view.filter_options.iter() {
        let chosen = view.selection.values(&set.dimension);
        let values: Vec<String> = set
            .values
            .iter()
            .map(|value| {
                if chosen.contains(value) {
                    format!("[{}]", value)
                } else {
                    value.clone()
                }
            })
            .collect();
        output.push_str(&format!("{}: {}\n", set.dimension, values.join(", ")));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use component_history::component_history::domain::FilterOptionSet;

    #[test]
    fn test_render_filter_options_marks_selected_values() {
        let dimensions = vec!["IMAGE_VERSION".to_string(), "IMAGE_REF_NAME".to_string()];
        let mut selection = FilterSelection::with_dimensions(&dimensions);
        selection.set("IMAGE_VERSION", vec!["4.1.0".to_string()]);

        let mut view = HistoryView::from_snapshot(PipelineSnapshot {
            selection,
            dimensions,
            ..PipelineSnapshot::default()
        });
        view.filter_options = FilterOptions::new(vec![
            FilterOptionSet {
                dimension: "IMAGE_VERSION".to_string(),
                values: vec!["4.1.2".to_string(), "4.1.0".to_string()],
            },
            FilterOptionSet {
                dimension: "IMAGE_REF_NAME".to_string(),
                values: vec![],
            },
        ]);

        assert_eq!(
            render_filter_options(&view),
            "IMAGE_VERSION: 4.1.2, [4.1.0]\nIMAGE_REF_NAME: \n"
        );
    }
}
