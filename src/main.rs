use clap::Parser;
use form_sync::cli::commands::{PageSource, cmd_detect, cmd_populate, cmd_scrape};
use form_sync::cli::config::{
    Cli, Commands, build_extract_options, build_inject_options, load_config, log_filter,
};
use form_sync::error::FormSyncError;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(cli.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Detect { html } => {
            cmd_detect(&html)?;
        }
        Commands::Scrape {
            html,
            url,
            cookie,
            output,
            status_column,
        } => {
            let source = match (html, url) {
                (Some(path), _) => PageSource::File(path),
                (None, Some(url)) => PageSource::Url {
                    url,
                    cookie: cookie.or(config.fetch.cookie.clone()),
                },
                // The `source` arg group rejects this at parse time.
                (None, None) => return Err(FormSyncError::MissingSource.into()),
            };
            let options = build_extract_options(&config, status_column);
            cmd_scrape(&source, output.as_deref(), &options)?;
        }
        Commands::Populate {
            html,
            data,
            output,
            write_secondary_fields,
            trace,
        } => {
            let options = build_inject_options(&config, write_secondary_fields);
            let trace = trace.or(config.inject.trace_file.clone());
            cmd_populate(&html, &data, output.as_deref(), &options, trace.as_deref())?;
        }
    }

    Ok(())
}
