use clap::Parser;
use college_finder::app::render;
use college_finder::config::toml_config::TomlConfig;
use college_finder::core::compare::{ComparisonMatrix, ComparisonSet};
use college_finder::core::details::details;
use college_finder::core::search::SearchRequest;
use college_finder::core::query;
use college_finder::utils::{logger, validation::Validate};
use college_finder::{source_for, CliConfig, Command, DatasetLoader, FinderError, Result, Settings};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let file_config = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    let settings = Settings::resolve(&cli.overrides(), file_config.as_ref());

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }
    tracing::debug!("Effective settings: {:?}", settings);

    let validated = match &file_config {
        Some(config) => config.validate().and_then(|_| settings.validate()),
        None => settings.validate(),
    };
    if let Err(e) = validated {
        report(&e);
        std::process::exit(e.exit_code());
    }

    if let Err(e) = run(&cli.command, &settings).await {
        report(&e);
        std::process::exit(e.exit_code());
    }
}

fn report(e: &FinderError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

async fn run(command: &Command, settings: &Settings) -> Result<()> {
    // Reject malformed search input before touching the data source.
    let search = match command {
        Command::Search { rank, category } => {
            let category = category.as_deref().or(settings.default_category.as_deref());
            Some(SearchRequest::parse(
                rank.as_deref().unwrap_or_default(),
                category.unwrap_or_default(),
            )?)
        }
        _ => None,
    };

    let loader = DatasetLoader::new(source_for(settings)?);
    let loaded = loader.load().await?;
    let dataset = &loaded.dataset;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let format = settings.format;

    match command {
        Command::Categories => render::render_categories(&mut out, format, &query::categories(dataset)),
        Command::Institutes => render::render_institutes(&mut out, format, &query::institutes(dataset)),
        Command::Search { .. } => match search {
            Some(request) => {
                let outcome = request.run(dataset);
                render::render_search(&mut out, format, &outcome, settings.branch_preview)
            }
            None => Ok(()),
        },
        Command::Details { code } => {
            let institute = details(dataset, code)?;
            render::render_details(&mut out, format, institute)
        }
        Command::Compare {
            colleges,
            add,
            remove,
        } => {
            let mut set = ComparisonSet::from_param(dataset, colleges);
            if let Some(code) = add {
                set.add(dataset, code)?;
            }
            if let Some(code) = remove {
                set.remove(code);
            }
            match set.to_param() {
                Some(param) => tracing::info!("Comparison: compare --colleges {}", param),
                None => tracing::info!("Comparison is empty"),
            }
            render::render_comparison(&mut out, format, &ComparisonMatrix::build(&set))
        }
        Command::MinRank { category } => {
            render::render_min_rank(&mut out, format, category, query::min_rank(dataset, category))
        }
        Command::Validate => render::render_issues(&mut out, format, &dataset.validate()),
    }
}
