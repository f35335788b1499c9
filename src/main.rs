// Command-line entry point.
// Renders site routes into a headless shell and prints the resulting markup.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use revoguide::shell::APP_REGION;
use revoguide::state::{CategoryFilter, quick_jump_entries};
use revoguide::{App, GuideError, MemoryShell, QuickJump, Shell, SiteConfig};

#[derive(Parser)]
#[command(name = "revoguide", version, about = "Revolution Macro guide, fixes, and changelog")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory or http(s) URL holding the site content
    #[arg(long, global = true)]
    site_root: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a route and print a region of the page
    Render {
        /// Fragment to render, e.g. `#/changelog`
        #[arg(default_value = "#/guide")]
        fragment: String,

        /// Region to print
        #[arg(long, default_value = APP_REGION)]
        region: String,

        /// Quick-jump to a guide section before rendering
        #[arg(long)]
        jump: Option<String>,
    },
    /// Print approved fixes matching a filter
    Fixes {
        /// all, windows, mac, macro, pro, or general
        #[arg(long, default_value = "all")]
        category: String,

        #[arg(long, default_value = "")]
        search: String,
    },
    /// List the guide's section descriptors
    Sections,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "revoguide=debug" } else { "revoguide=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> revoguide::Result<()> {
    let mut config = SiteConfig::load(cli.config.as_deref())?;
    if let Some(root) = cli.site_root {
        config.content.root = root;
    }

    let shell = Arc::new(MemoryShell::new());
    let app = App::from_config(config, shell.clone())?;

    match cli.command {
        Command::Render {
            fragment,
            region,
            jump,
        } => {
            shell.set_fragment(&fragment);
            app.start().await;
            if let Some(id) = jump {
                if app.quick_jump(&id) == QuickJump::Deferred {
                    app.navigate().await;
                }
                for (id, offset) in shell.scrolls() {
                    eprintln!("scrolled to #{} (offset {}px)", id, offset);
                }
            }
            let html = shell
                .region(&region)
                .ok_or(GuideError::MissingRegion(region))?;
            println!("{}", html);
        }
        Command::Fixes { category, search } => {
            let category = CategoryFilter::from_key(&category)
                .ok_or_else(|| GuideError::Config(format!("unknown category: {}", category)))?;
            app.navigate_to("#/troubleshooting").await;
            app.select_category(category)?;
            app.search_fixes(&search)?;

            if let Some(board) = app.board() {
                for item in board.visible() {
                    println!(
                        "#{}\t[{}]\t{}\t{}",
                        item.number,
                        item.category.badge(),
                        item.title,
                        item.html_url
                    );
                }
            }
        }
        Command::Sections => {
            let sections = app.pages().guide_sections().await?;
            for section in sections.iter() {
                println!("{}\t{}\t{}", section.id, section.file, section.title());
            }
            println!();
            for (idx, section) in quick_jump_entries(&sections).into_iter().enumerate() {
                println!("quick jump {}: {}", idx + 1, section.id);
            }
        }
    }

    debug!(stats = ?app.pages().github().cache_stats(), "github cache");
    Ok(())
}
