use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use venue_footprint::city::{builtin_host_list, read_attendees_file, render_host_list, HostResolver, ResolvedHost};
use venue_footprint::config::Settings;
use venue_footprint::report::{render_ranking, HostReport};
use venue_footprint::CityCollection;

/// footprint — conference travel CO2 estimator
///
/// Reads an attendee list and estimates the travel emissions of holding the
/// conference in a given host city.
///
/// Examples:
///   footprint attendee_locations.csv
///   footprint attendee_locations.csv --host London --top 5
///   footprint attendees.json --lat 1.3521 --lon 103.8198 --country Singapore
///   footprint attendee_locations.csv --ranking --save
///   footprint --list-hosts
#[derive(Parser)]
#[command(name = "footprint", version, about, long_about = None)]
struct Cli {
    /// Attendee file (.csv, or .json for typed records).
    #[arg(required_unless_present = "list_hosts")]
    file: Option<PathBuf>,

    /// List the built-in host cities and exit.
    #[arg(long)]
    list_hosts: bool,

    /// Host city name: a city from the attendee list or a built-in host.
    #[arg(long)]
    host: Option<String>,

    /// Host latitude (-90 to 90). Use with --lon.
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<f64>,

    /// Host longitude (-180 to 180). Use with --lat.
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<f64>,

    /// Country label for a --lat/--lon host.
    #[arg(long)]
    country: Option<String>,

    /// Countries shown individually in the chart.
    #[arg(long, short = 'n')]
    top: Option<usize>,

    /// Save the chart. Without a path, saves to <chart_dir>/<host>_emitters.txt.
    #[arg(long, num_args = 0..=1)]
    save: Option<Option<PathBuf>>,

    /// Rank every attendee city as a candidate host.
    #[arg(long)]
    ranking: bool,

    /// Print a JSON report to stdout instead of the text summary.
    #[arg(long)]
    json: bool,

    /// Alternate settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    init_logging(&cli, &settings);

    if cli.list_hosts {
        eprint!("{}", render_host_list(&builtin_host_list()));
        return;
    }

    // ── Load attendees ──────────────────────────────────────────

    let Some(file) = cli.file.as_deref() else {
        eprintln!("Error: No attendee file specified.");
        std::process::exit(1);
    };
    let collection = read_attendees_file(file).unwrap_or_else(|e| {
        eprintln!("Error: {}: {}", file.display(), e);
        std::process::exit(1);
    });

    // ── Resolve host ────────────────────────────────────────────

    let host = resolve_host(&cli, &settings, &collection);
    eprintln!("  Host: {}", host.display_line());

    let top = cli.top.unwrap_or(settings.top);

    // ── Report ──────────────────────────────────────────────────

    if cli.json {
        let report = HostReport::build(&collection, &host.city, top, cli.ranking);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: Cannot serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        let mut stdout = std::io::stdout();
        if let Err(e) = collection.summary(&host.city, &mut stdout) {
            eprintln!("Error: Cannot write summary: {}", e);
            std::process::exit(1);
        }
        if cli.ranking {
            println!();
            println!("Candidate hosts by total CO2 (lowest first):");
            print!("{}", render_ranking(&collection.sorted_by_emissions()));
        }
    }

    // ── Chart ───────────────────────────────────────────────────

    let save_path = cli
        .save
        .as_ref()
        .map(|p| p.clone().unwrap_or_else(|| settings.chart_path(host.city.name())));

    match collection.plot_top_emitters(&host.city, top, save_path.as_deref()) {
        Ok(chart) => {
            eprint!("{}", chart);
            if let Some(path) = save_path {
                eprintln!("  Chart saved to {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("Error: Cannot save chart: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(cli: &Cli, settings: &Settings) {
    let fallback = if cli.verbose { "debug" } else { settings.log_filter.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_host(cli: &Cli, settings: &Settings, collection: &CityCollection) -> ResolvedHost {
    // Priority: --lat/--lon > --host > configured host

    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        return HostResolver::from_coordinates(lat, lon, cli.country.as_deref()).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    }

    let name = cli.host.as_deref().unwrap_or(&settings.host);
    HostResolver::new(collection).resolve(name).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  footprint attendee_locations.csv --host Zurich");
        eprintln!("  footprint attendee_locations.csv --lat 47.22 --lon 8.33 --country Switzerland");
        std::process::exit(1);
    })
}
