use std::error::Error;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use studyspot::domain::{Category, DomainError, StudyLocation};
use studyspot::geo::Coordinate;
use studyspot::libraries::remote::{DEFAULT_LOCATION_LIMIT, DEFAULT_SEARCH_RADIUS_M};
use studyspot::libraries::{CalilClient, CalilConfig, local};
use studyspot::locations::{DEFAULT_MAX_DISTANCE_M, LocationFilter, sample_locations};
use studyspot::search::{
    LibrarySearch, SearchConfig, SearchMode, SearchOutcome, SearchResults, SearchSession,
};
use studyspot::stations::{StationDirectory, StationSuggestClient, StationSuggestConfig};

#[derive(Debug, Parser)]
#[command(name = "studyspot")]
#[command(about = "Find libraries and study spots near you or your stations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Calil application key
    #[arg(long, global = true, env = "CALIL_API_KEY", hide_env_values = true)]
    calil_key: Option<String>,

    /// Override the Calil API base URL
    #[arg(long, global = true, env = "CALIL_BASE_URL")]
    calil_base_url: Option<String>,

    /// Override the HeartRails Express base URL
    #[arg(long, global = true, env = "HEARTRAILS_BASE_URL")]
    heartrails_base_url: Option<String>,

    /// JSON station table to use instead of the built-in one
    #[arg(long, global = true, env = "STUDYSPOT_STATIONS")]
    stations: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search stations by name
    Stations {
        query: String,

        /// Also ask HeartRails Express for suggestions
        #[arg(long)]
        remote: bool,
    },

    /// Show one station by id
    Station { id: String },

    /// Stations near a point, nearest first
    NearbyStations {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Radius in metres
        #[arg(long, default_value_t = 1_000.0)]
        radius: f64,
    },

    /// Open/closed status of a curated library
    LibraryStatus { id: String },

    /// Curated libraries near a point
    NearbyLibraries {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Radius in metres
        #[arg(long, default_value_t = 5_000.0)]
        radius: f64,
    },

    /// Calendar of a curated library
    Calendar {
        id: String,
        /// Month (1-12)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Search the Calil library directory
    Calil {
        #[command(subcommand)]
        search: CalilSearch,

        /// Result cap
        #[arg(long, global = true, default_value_t = DEFAULT_LOCATION_LIMIT)]
        limit: u32,

        /// Print study locations instead of raw directory records
        #[arg(long, global = true)]
        as_locations: bool,
    },

    /// Study locations from the sample dataset
    Locations {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Only applies when a position is given
        #[arg(long, default_value_t = DEFAULT_MAX_DISTANCE_M)]
        max_distance: f64,
        #[arg(long)]
        only_free: bool,
        #[arg(long)]
        only_open: bool,
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
        /// Include the curated libraries
        #[arg(long)]
        with_libraries: bool,
    },
}

#[derive(Debug, Subcommand)]
enum CalilSearch {
    /// Libraries in a prefecture
    Prefecture { prefecture: String },
    /// Libraries in a city
    City { prefecture: String, city: String },
    /// Libraries near a point
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Radius in metres
        #[arg(long, default_value_t = DEFAULT_SEARCH_RADIUS_M)]
        radius: f64,
    },
    /// Libraries of one library system
    System { system_id: String },
    /// Libraries within walking distance of stations
    NearStations {
        #[arg(required = true)]
        station_ids: Vec<String>,
        /// Walking budget in minutes
        #[arg(long, default_value_t = 5)]
        minutes: u32,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| {
        let known: Vec<_> = Category::ALL.iter().map(Category::as_str).collect();
        format!("unknown category {s:?}, expected one of {}", known.join(", "))
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn calil_client(cli: &Cli) -> Result<CalilClient, Box<dyn Error>> {
    let key = cli
        .calil_key
        .clone()
        .ok_or("CALIL_API_KEY is not set (use --calil-key or the environment)")?;

    let mut config = CalilConfig::new(key).with_timeout(cli.timeout);
    if let Some(url) = &cli.calil_base_url {
        config = config.with_base_url(url);
    }
    Ok(CalilClient::new(config)?)
}

fn station_directory(cli: &Cli) -> Result<StationDirectory, Box<dyn Error>> {
    Ok(match &cli.stations {
        Some(path) => StationDirectory::load_json(path)?,
        None => StationDirectory::builtin(),
    })
}

fn study_locations(outcome: &SearchOutcome) -> Vec<StudyLocation> {
    match &outcome.libraries {
        SearchResults::Libraries(records) => records
            .iter()
            .filter_map(|r| r.to_study_location())
            .collect(),
        SearchResults::NearStations(annotated) => annotated
            .iter()
            .filter_map(|a| a.library.to_study_location())
            .collect(),
    }
}

async fn run_calil(
    cli: &Cli,
    search: &CalilSearch,
    limit: u32,
    as_locations: bool,
) -> Result<(), Box<dyn Error>> {
    let client = calil_client(cli)?;

    let mode = match search {
        CalilSearch::System { system_id } => {
            let records = client.search_by_system_id_strict(system_id).await?;
            return print_json(&records);
        }
        CalilSearch::Prefecture { prefecture } => SearchMode::Prefecture {
            prefecture: prefecture.clone(),
        },
        CalilSearch::City { prefecture, city } => SearchMode::City {
            prefecture: prefecture.clone(),
            city: city.clone(),
        },
        CalilSearch::Nearby { lat, lon, .. } => SearchMode::Nearby {
            origin: lat.zip(*lon).map(|(lat, lon)| Coordinate::new(lat, lon)),
        },
        CalilSearch::NearStations {
            station_ids,
            minutes,
        } => SearchMode::Station {
            station_ids: station_ids.clone(),
            walking_minutes: *minutes,
        },
    };

    let mut config = SearchConfig::default().with_limit(limit);
    if let CalilSearch::Nearby { radius, .. } = search {
        config.nearby_radius_m = *radius;
    }
    let stations = station_directory(cli)?;
    let library_search = LibrarySearch::new(&client, &stations, &config);

    let session = SearchSession::new();
    session.search(&library_search, &mode).await;
    let outcome = session.results();

    if let Some(advisory) = &outcome.advisory {
        eprintln!("{advisory}");
    }
    info!(results = outcome.libraries.len(), "search finished");

    if as_locations {
        print_json(&study_locations(&outcome))
    } else {
        print_json(&outcome)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Stations { query, remote } => {
            let mut directory = station_directory(&cli)?;
            if *remote {
                let mut config = StationSuggestConfig::new().with_timeout(cli.timeout);
                if let Some(url) = &cli.heartrails_base_url {
                    config = config.with_base_url(url);
                }
                let suggestions = StationSuggestClient::new(config)?.suggest(query).await;
                directory = directory.with_suggestions(suggestions);
            }
            print_json(&directory.search_by_name(query))?;
        }
        Commands::Station { id } => {
            let directory = station_directory(&cli)?;
            let station = directory
                .get_by_id(id)
                .ok_or_else(|| DomainError::StationNotFound(id.clone()))?;
            print_json(station)?;
        }
        Commands::NearbyStations { lat, lon, radius } => {
            let directory = station_directory(&cli)?;
            let origin = Coordinate::new(*lat, *lon);
            print_json(&directory.search_nearby(&origin, *radius))?;
        }
        Commands::LibraryStatus { id } => {
            let status = local::check_status(id, Local::now().naive_local())?;
            print_json(&status)?;
        }
        Commands::NearbyLibraries { lat, lon, radius } => {
            let origin = Coordinate::new(*lat, *lon);
            print_json(&local::search_nearby(&origin, *radius))?;
        }
        Commands::Calendar { id, month } => {
            print_json(&local::library_calendar(id, *month)?)?;
        }
        Commands::Calil {
            search,
            limit,
            as_locations,
        } => {
            run_calil(&cli, search, *limit, *as_locations).await?;
        }
        Commands::Locations {
            lat,
            lon,
            max_distance,
            only_free,
            only_open,
            category,
            with_libraries,
        } => {
            let mut locations = sample_locations();
            if *with_libraries {
                locations.extend(
                    local::major_libraries()
                        .iter()
                        .map(|l| l.to_study_location()),
                );
            }

            let filter = LocationFilter {
                max_distance_m: *max_distance,
                only_free: *only_free,
                only_open: *only_open,
                category: *category,
            };
            let user = lat.zip(*lon).map(|(lat, lon)| Coordinate::new(lat, lon));
            let now = Local::now().naive_local();
            print_json(&filter.apply(&locations, user.as_ref(), &now))?;
        }
    }

    Ok(())
}
