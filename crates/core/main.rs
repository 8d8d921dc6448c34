#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{path::PathBuf, process, time::Duration};

mod file;
mod terminal;

use bookscan as lib;

use lib::server::{self, ApiBookSource, ServerState};

use clap::{AppSettings, Parser, Subcommand};
use eyre::Context;
use log::{error, info, trace, warn};

fn main() {
    if let Err(err) = try_main() {
        error!("{:#}", err);
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    // load .env before parsing so env fallbacks of the cli can see it
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // if quiet then ignore verbosity but still show errors
    let verbosity = if cli.quiet {
        1
    } else {
        cli.verbosity as usize + 1
    };

    stderrlog::new().verbosity(verbosity).init()?;

    match dotenv {
        Ok(path) => trace!("Loaded environment from '{}'", path.display()),
        Err(err) => trace!("No .env file loaded: {err}"),
    }

    match cli.command {
        Commands::Serve {
            addr,
            rakuten_app_id,
        } => serve(&addr, rakuten_app_id),
        Commands::Scan { server, timeout } => {
            terminal::run(&server, Duration::from_secs(timeout), cli.quiet)
        }
        Commands::Lookup {
            isbn,
            rakuten_app_id,
        } => {
            let book = lib::book_by_isbn(&isbn, rakuten_app_id.as_deref())?;
            if !cli.quiet {
                println!("{}", serde_json::to_string_pretty(&book)?);
            }
            Ok(())
        }
        Commands::Download { server, output } => {
            let client = reqwest::blocking::Client::new();
            let export = file::fetch_export(&client, &server, lib::ui::DOWNLOAD_PATH)?;
            let path = match output {
                Some(path) => export.save_as(&path)?,
                None => export.save_in(&PathBuf::from("."))?,
            };
            info!("Export saved to '{}'", path.display());
            Ok(())
        }
    }
}

fn serve(addr: &str, rakuten_app_id: Option<String>) -> eyre::Result<()> {
    if rakuten_app_id.is_none() {
        warn!("No Rakuten application id set - Rakuten Books will not be searched");
    }
    let state = ServerState::new(ApiBookSource::new(rakuten_app_id));

    let runtime = tokio::runtime::Runtime::new().wrap_err("Cannot start the async runtime")?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .wrap_err_with(|| format!("Cannot listen on '{addr}'"))?;
        server::serve(listener, state).await?;
        Ok::<_, eyre::Report>(())
    })
}

#[derive(Parser)]
#[clap(name = "bookscan")]
#[clap(about = "Scan ISBN barcodes into a table of book metadata and export it as CSV")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
#[non_exhaustive]
enum Commands {
    /// Run the lookup and export service
    Serve {
        /// Address to listen on
        #[clap(long, env = "BOOKSCAN_ADDR", default_value = "127.0.0.1:5000")]
        addr: String,

        /// Application id for the Rakuten Books API
        #[clap(long, env = "RAKUTEN_API_KEY", hide_env_values = true)]
        rakuten_app_id: Option<String>,
    },
    /// Scan codes from stdin and look them up through the service
    ///
    /// Type `start` to begin a scan session, then scan (or type) a code. The session stops
    /// after each detection. `stop` ends a session, `download` saves the CSV export, `quit`
    /// exits.
    Scan {
        /// Base URL of the service
        #[clap(long, env = "BOOKSCAN_SERVER", default_value = "http://127.0.0.1:5000")]
        server: String,

        /// Seconds to wait for a lookup before giving up
        #[clap(long, default_value = "10")]
        timeout: u64,
    },
    /// Look up a single ISBN directly against the book APIs
    #[clap(setting(AppSettings::ArgRequiredElseHelp))]
    Lookup {
        /// The ISBN to search for
        isbn: String,

        /// Application id for the Rakuten Books API
        #[clap(long, env = "RAKUTEN_API_KEY", hide_env_values = true)]
        rakuten_app_id: Option<String>,
    },
    /// Save the CSV export of everything the service recorded
    Download {
        /// Base URL of the service
        #[clap(long, env = "BOOKSCAN_SERVER", default_value = "http://127.0.0.1:5000")]
        server: String,

        /// File to write, defaults to the name the service suggests in the current directory
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}
