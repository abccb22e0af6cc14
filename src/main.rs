use anyhow::{Context, Result};
use clap::Parser;
use film_locations::config::{self, FilmConfig};
use film_locations::logging;
use film_locations::render::HtmlPanel;
use film_locations::FilmSearch;
use std::fs;
use std::path::PathBuf;

/// Where was that movie set? Ask DBpedia and Wikidata, get hotel links.
#[derive(Debug, Parser)]
#[command(name = "filmloc", version, about)]
struct Cli {
    /// Movie title (or part of it); matched case-insensitively.
    title: String,

    /// Write the result page to this file instead of printing a list.
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Configuration file (default: $XDG_CONFIG_HOME/film-locations/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log queries and row counts.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    logging::init_logging(cli.verbose).expect("failed to initialize logging");

    if let Err(err) = run(cli) {
        eprintln!("filmloc error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg: FilmConfig = match &cli.config {
        Some(path) => config::load_or_init_at(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => config::load_or_init().context("loading config")?,
    };
    let search = FilmSearch::from_config(&cfg);

    match cli.html {
        Some(path) => {
            let mut panel = HtmlPanel::new();
            search.submit(&cli.title, &mut panel);
            fs::write(&path, panel.page())
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            let report = search.collect(&cli.title);
            print!("{}", search.listing(&report));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_title_and_flags() {
        let cli = Cli::parse_from(["filmloc", "-v", "--html", "out.html", "The Third Man"]);
        assert_eq!(cli.title, "The Third Man");
        assert_eq!(cli.html, Some(PathBuf::from("out.html")));
        assert!(cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn title_is_required() {
        assert!(Cli::try_parse_from(["filmloc"]).is_err());
    }
}
