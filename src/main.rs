use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use slotwatch::data::format::parse_date;
use slotwatch::render::table;
use slotwatch::{
    AppConfig, ConsoleNotifier, FileSource, LookupSource, Monitor, Notifier, PortalSource,
    RunOutcome, SmtpNotifier, TermSource,
};
use slotwatch_types::{LookupEntry, PartOfDay, TermQuery, VisitLanguage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "slotwatch", version)]
#[command(about = "Watch a medical booking portal for free visits and get notified by email")]
struct Args {
    /// Path to the settings file (default: config.toml, optional)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available cities
    Cities,

    /// List available services
    Services,

    /// List clinics offering a service in a city
    Clinics {
        /// City ID
        #[arg(short, long)]
        city_id: u64,

        /// Service ID
        #[arg(short, long)]
        service_id: u64,
    },

    /// List doctors offering a service in a city
    Doctors {
        /// City ID
        #[arg(short, long)]
        city_id: u64,

        /// Service ID
        #[arg(short, long)]
        service_id: u64,

        /// Only doctors working in this clinic
        #[arg(short = 'l', long)]
        clinic_id: Option<u64>,
    },

    /// Look for free visits once and email a report if any are found
    Monitor(MonitorArgs),
}

#[derive(clap::Args, Debug)]
struct MonitorArgs {
    /// Address the report is sent to
    #[arg(short, long)]
    email: String,

    /// City ID
    #[arg(short, long)]
    city_id: u64,

    /// Service ID
    #[arg(short, long)]
    service_id: u64,

    /// First date to search, YYYY-MM-DD (default: today)
    #[arg(short, long, value_parser = parse_date)]
    from_date: Option<NaiveDate>,

    /// Last date to search, YYYY-MM-DD
    #[arg(short, long, value_parser = parse_date)]
    to_date: NaiveDate,

    /// Part of day: 0 any, 1 morning, 2 midday, 3 evening
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    part_of_day: u8,

    /// Only visits in this clinic
    #[arg(short = 'l', long)]
    clinic_id: Option<u64>,

    /// Only visits with this doctor
    #[arg(short, long)]
    doctor_id: Option<u64>,

    /// Language the doctor speaks: pl or eng
    #[arg(long, default_value = "pl")]
    language: VisitLanguage,

    /// Print the report instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Read terms from a JSON file instead of the portal
    #[arg(long)]
    terms_file: Option<PathBuf>,

    /// Also write the report as JSON to this file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose)?;

    let config = AppConfig::load(args.config.as_deref()).context("Failed to load settings")?;

    match args.command {
        Command::Cities => {
            let mut source = portal_source(&config)?;
            print_lookup("city", source.cities()?);
        }
        Command::Services => {
            let mut source = portal_source(&config)?;
            print_lookup("service", source.services()?);
        }
        Command::Clinics {
            city_id,
            service_id,
        } => {
            let mut source = portal_source(&config)?;
            print_lookup("clinic", source.clinics(city_id, service_id)?);
        }
        Command::Doctors {
            city_id,
            service_id,
            clinic_id,
        } => {
            let mut source = portal_source(&config)?;
            print_lookup("doctor", source.doctors(city_id, service_id, clinic_id)?);
        }
        Command::Monitor(monitor_args) => run_monitor(&config, monitor_args)?,
    }

    Ok(())
}

/// Log to stderr so listings on stdout stay pipeable.
fn init_logging(verbose: bool) -> Result<()> {
    let default_directive = if verbose {
        "slotwatch=debug,slotwatch_adapters=debug"
    } else {
        "slotwatch=info,slotwatch_adapters=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .context("Invalid log filter")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn portal_source(config: &AppConfig) -> Result<PortalSource> {
    let settings = config.portal()?;
    PortalSource::from_settings(settings).context("Failed to set up the booking portal client")
}

fn print_lookup(kind: &str, entries: Vec<LookupEntry>) {
    println!("{}", table::render(kind, &entries));
}

fn run_monitor(config: &AppConfig, args: MonitorArgs) -> Result<()> {
    let from_date = args
        .from_date
        .unwrap_or_else(|| Local::now().date_naive());
    if from_date > args.to_date {
        bail!(
            "The first date ({}) is after the last date ({})",
            from_date,
            args.to_date
        );
    }

    let query = TermQuery::new(args.city_id, args.service_id, from_date, args.to_date)
        .with_clinic_id(args.clinic_id)
        .with_doctor_id(args.doctor_id)
        .with_language(args.language);
    let criteria = query.criteria(PartOfDay::new(args.part_of_day));

    // Settings are checked before anything is fetched
    let notifier: Box<dyn Notifier> = if args.dry_run {
        Box::new(ConsoleNotifier::new())
    } else {
        let settings = config.email()?;
        Box::new(SmtpNotifier::from_settings(settings).context("Failed to set up email")?)
    };
    let source: Box<dyn TermSource> = match &args.terms_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(portal_source(config)?),
    };

    tracing::info!(
        "Looking for visits from {} to {} (part of day {}, language {}) using {}",
        from_date,
        args.to_date,
        criteria.part_of_day,
        args.language,
        source.description()
    );

    let mut monitor = Monitor::new(source, notifier);
    if let Some(path) = args.export {
        monitor = monitor.with_export(path);
    }

    match monitor.run(&query, &criteria, &args.email)? {
        RunOutcome::Notified { overall_count } => {
            tracing::info!("Reported {} visits to {}", overall_count, args.email);
        }
        RunOutcome::NothingAvailable => {
            tracing::debug!("Nothing to report");
        }
    }

    Ok(())
}
