//! Serve or render the tool shelf pages.
//!
//! # Examples
//!
//! ```sh
//! # Serve the site from ./static on port 3001
//! toolshelf serve
//!
//! # Serve a catalogue published elsewhere
//! toolshelf serve --data https://example.com/data/tools.json --port 8080
//!
//! # Print the listing page, or one detail page, to stdout
//! toolshelf render --data static/data/tools.json
//! toolshelf render --data static/data/tools.json --slug md-lint
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use toolshelf::{Page, render_page, source_from_location};
use toolshelf_web::{WebConfig, spawn_web};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Tool shelf catalogue site.
#[derive(Parser)]
#[command(name = "toolshelf", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the listing and detail pages over HTTP.
    Serve {
        /// Port for the web server.
        #[arg(long, default_value_t = 3001)]
        port: u16,

        /// Listen on all interfaces instead of loopback only.
        #[arg(long)]
        public: bool,

        /// Catalogue location: file path or http(s) URL.
        #[arg(long, default_value = "static/data/tools.json")]
        data: String,

        /// Directory holding assets/ and data/.
        #[arg(long, default_value = "static")]
        static_dir: PathBuf,
    },

    /// Render one page to stdout.
    Render {
        /// Catalogue location: file path or http(s) URL.
        #[arg(long, default_value = "static/data/tools.json")]
        data: String,

        /// Render the detail page for this slug instead of the listing.
        #[arg(long)]
        slug: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Command::Serve {
            port,
            public,
            data,
            static_dir,
        } => serve(port, public, data, static_dir).await,
        Command::Render { data, slug } => render(&data, slug.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn serve(port: u16, public: bool, data: String, static_dir: PathBuf) -> Result<(), String> {
    let ip = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
    let config = WebConfig {
        bind_addr: (ip, port).into(),
        data,
        static_dir: Some(static_dir),
    };
    let addr = spawn_web(config).await?;
    println!("Tool shelf: http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    Ok(())
}

async fn render(data: &str, slug: Option<&str>) -> Result<(), String> {
    let source = source_from_location(data).map_err(|e| e.to_string())?;
    let mut page = match slug {
        Some(_) => Page::detail(),
        None => Page::listing(),
    };
    render_page(&mut page, slug, source.as_ref()).await;
    print!("{}", page.to_html());
    Ok(())
}
