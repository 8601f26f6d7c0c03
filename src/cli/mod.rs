use crate::{ItineraryPlanner, PlannerConfig, TripPreferences, DEFAULT_RADIUS_MILES};
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::{env, time::Duration};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("chicago-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a personalized Chicago itinerary from trip survey answers")
        .arg(
            Arg::new("days")
                .short('d')
                .long("days")
                .value_name("DAYS")
                .help("Length of stay in days")
                .value_parser(value_parser!(u32))
                .required(true),
        )
        .arg(
            Arg::new("location")
                .short('l')
                .long("location")
                .value_name("NEIGHBORHOOD")
                .help("Neighborhood or area you are staying in")
                .required(true),
        )
        .arg(
            Arg::new("cuisine")
                .short('c')
                .long("cuisine")
                .value_name("CUISINE")
                .help("Favorite cuisine")
                .required(true),
        )
        .arg(
            Arg::new("activity-level")
                .short('a')
                .long("activity-level")
                .value_name("LEVEL")
                .help("Activity level: Low, Moderate or High")
                .default_value("Moderate"),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("DOLLARS")
                .help("Total trip budget")
                .value_parser(value_parser!(f64))
                .required(true),
        )
        .arg(
            Arg::new("with")
                .short('w')
                .long("with")
                .value_name("COMPANY")
                .help("Who you are travelling with (solo, couple, family, ...)")
                .default_value("solo"),
        )
        .arg(
            Arg::new("dislikes")
                .long("dislikes")
                .value_name("TEXT")
                .help("Things to avoid"),
        )
        .arg(
            Arg::new("radius")
                .short('r')
                .long("radius")
                .value_name("MILES")
                .help("Search radius around your location in miles")
                .value_parser(value_parser!(f64))
                .default_value("5"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Chat-completions model (or set PLANNER_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("API base URL (or set OPENAI_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds (or set PLANNER_TIMEOUT_SECS)")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("prompt-only")
                .long("prompt-only")
                .help("Print the generated prompt instead of calling the API")
                .action(ArgAction::SetTrue),
        )
}

fn preferences_from(matches: &ArgMatches) -> TripPreferences {
    let text = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

    TripPreferences::new(
        matches.get_one::<u32>("days").copied().unwrap_or(1),
        text("location"),
        text("cuisine"),
        text("activity-level"),
        matches.get_one::<f64>("budget").copied().unwrap_or_default(),
        text("with"),
        text("dislikes"),
    )
    .with_radius(
        matches
            .get_one::<f64>("radius")
            .copied()
            .unwrap_or(DEFAULT_RADIUS_MILES),
    )
}

fn config_from(matches: &ArgMatches) -> anyhow::Result<PlannerConfig> {
    let mut config = PlannerConfig::from_env().context("invalid planner environment")?;

    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*timeout));
    }

    Ok(config)
}

/// CLI entry point for the chicago-planner tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();
    let preferences = preferences_from(&matches);

    if matches.get_flag("prompt-only") {
        println!("{}", crate::build_prompt(&preferences));
        return Ok(());
    }

    // Missing keys are left for the API to reject
    let api_key = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| env::var("OPENAI_API_KEY").ok())
        .unwrap_or_default();
    let planner = ItineraryPlanner::with_config(api_key, config_from(&matches)?);

    info!("Planning {} day(s) around {}", preferences.stay_length, preferences.location);
    info!("Using model: {}", planner.config().model);
    info!("Base URL: {}", planner.config().base_url);

    match planner.get_recommendations(&preferences).await {
        Ok(result) => {
            for violation in result.audit(&preferences) {
                warn!("Itinerary rule not followed: {}", violation);
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
            info!("Itinerary generation completed successfully");
        }
        Err(e) => {
            error!("Itinerary unavailable: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
