mod chat;
mod setup;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use parlor_core::{
    filter_personalities, Catalog, Category, Credentials, ParlorConfig, ResponseGenerator,
    SessionStore,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "parlor")]
#[command(about = "Chat with Einstein, Shakespeare, Curie and friends")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the chat interface (default)
    Chat {
        /// Start talking to this personality (id or name)
        #[arg(long, short = 'p')]
        personality: Option<String>,
    },
    /// Print the personality catalog
    List {
        /// Only show names or descriptions containing this text
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Only show one category
        #[arg(long, short = 'c')]
        category: Option<Category>,
    },
    /// Send one message and print the reply
    Ask {
        /// Personality id or name
        personality: String,
        #[arg(required = true, trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Configure provider and API key
    Setup,
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter =
        EnvFilter::try_from_env("PARLOR_LOG").unwrap_or_else(|_| EnvFilter::new("parlor=info"));
    fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

fn build_generator(config: &ParlorConfig) -> Result<ResponseGenerator> {
    let creds = Credentials::resolve(Credentials::load()?, config);
    if !creds.is_configured() {
        warn!(provider = %creds.provider, "no API key configured; replies will explain how to set one");
    }

    let mut catalog = Catalog::builtin();
    catalog.extend_from_dir(&config.personalities_dir);

    Ok(ResponseGenerator::new(
        creds.build_provider(),
        Arc::new(catalog),
        Arc::new(SessionStore::new()),
    )
    .max_output_tokens(config.max_output_tokens))
}

fn resolve_id(catalog: &Catalog, key: &str) -> Result<String> {
    match catalog.resolve(key) {
        Some(p) => Ok(p.id.clone()),
        None => bail!("no personality matches '{key}' (see `parlor list`)"),
    }
}

fn print_list(catalog: &Catalog, search: Option<&str>, category: Option<Category>) {
    let rows = filter_personalities(catalog, search.unwrap_or(""), category);
    if rows.is_empty() {
        println!("nobody matches");
        return;
    }
    for p in rows {
        let cat = p.category.map(|c| c.to_string()).unwrap_or_default();
        println!("{:<4} {:<22} {:<11} {}", p.id, p.name, cat, p.description);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let config = ParlorConfig::load()?;

    if let Err(e) = init_logging(&config.log_path) {
        eprintln!("warning: logging disabled ({e})");
    }

    match cli.command.unwrap_or(Command::Chat { personality: None }) {
        Command::Setup => {
            setup::run_setup()?;
        }
        Command::List { search, category } => {
            let generator = build_generator(&config)?;
            print_list(generator.catalog(), search.as_deref(), category);
        }
        Command::Ask {
            personality,
            message,
        } => {
            let generator = build_generator(&config)?;
            let id = resolve_id(generator.catalog(), &personality)?;
            let text = message.join(" ");
            println!("{}", generator.respond(&id, &text).await);
        }
        Command::Chat { personality } => {
            if Credentials::load()?.is_none() && config.api_key.trim().is_empty() {
                setup::run_setup()?;
            }
            let generator = Arc::new(build_generator(&config)?);
            let initial = match personality {
                Some(key) => Some(resolve_id(generator.catalog(), &key)?),
                None => None,
            };
            info!(model = %config.model, "starting chat");
            chat::run(generator, initial).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["parlor", "ask", "einstein", "what", "is", "time?"]).unwrap();
        match cli.command {
            Some(Command::Ask {
                personality,
                message,
            }) => {
                assert_eq!(personality, "einstein");
                assert_eq!(message.join(" "), "what is time?");
            }
            _ => panic!("expected ask"),
        }

        let cli = Cli::try_parse_from(["parlor", "list", "--category", "science"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::List {
                category: Some(Category::Science),
                ..
            })
        ));

        assert!(Cli::try_parse_from(["parlor", "list", "--category", "music"]).is_err());
        assert!(Cli::try_parse_from(["parlor", "ask", "1"]).is_err());
        assert!(Cli::try_parse_from(["parlor"]).unwrap().command.is_none());
    }

    #[test]
    fn resolve_id_accepts_names() {
        let catalog = Catalog::builtin();
        assert_eq!(resolve_id(&catalog, "2").unwrap(), "2");
        assert_eq!(resolve_id(&catalog, "Marie Curie").unwrap(), "3");
        assert!(resolve_id(&catalog, "napoleon").is_err());
    }
}
