use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gym_spotter::{
    AppConfig, Clock, GymApiClient, GymDirectory, GymFilter, Locale, SystemClock, directory,
    load_gyms_from_file,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "gym-spotter")]
#[command(about = "Gym directory - opening hours and open/closed status")]
struct Args {
    /// Read gym records from a JSON export instead of the backend
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Display language (cs or en)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List gyms with their current open/closed badge
    List {
        /// Only gyms accepting the MultiSport card
        #[arg(long)]
        multisport: bool,
    },
    /// Show the weekly opening hours of a gym
    Hours {
        /// Gym name (case-insensitive)
        name: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .parse_lossy("gym_spotter=debug");

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let locale = args.locale.unwrap_or(config.display.locale);

    let gyms = match &args.file {
        Some(path) => load_gyms_from_file(path)?,
        None => {
            let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
            let client = GymApiClient::new(&config.backend, &config.network)?;
            rt.block_on(client.fetch_gyms())?
        }
    };
    let gyms = GymDirectory::new(gyms);
    let clock = SystemClock;

    match args.command {
        Command::List { multisport } => {
            let filter = GymFilter {
                multisport_only: multisport || config.display.multisport_only,
            };
            print_listing(&gyms, filter, &clock, locale);
        }
        Command::Hours { name } => {
            let gym = gyms
                .find_by_name(&name)
                .with_context(|| format!("No gym named {name:?}"))?;
            let now = clock.wall_clock();

            println!("{} - {}", gym.name, gym.address);
            println!("{}", directory::status_or_closed(gym, &now).label(locale));
            println!("{}", locale.multisport(gym.multisport));
            println!();
            println!("{}", locale.opening_hours());
            match directory::schedule_rows(gym, &now, locale) {
                Ok(Some(rows)) => {
                    for row in rows {
                        println!("  {row}");
                    }
                }
                Ok(None) => println!("  {}", locale.open_24_7()),
                Err(e) => {
                    tracing::warn!(gym_id = %gym.id, "Cannot show opening hours: {}", e);
                    println!("  {e}");
                }
            }
        }
    }

    Ok(())
}

fn print_listing<C: Clock>(gyms: &GymDirectory, filter: GymFilter, clock: &C, locale: Locale) {
    let listing = gyms.listing_with_clock(filter, clock);
    tracing::debug!("Showing {} of {} gyms", listing.len(), gyms.len());

    for entry in listing {
        println!(
            "{:<30} {:<15} {}",
            entry.gym.name,
            entry.status.label(locale),
            entry.gym.address
        );
    }
}
