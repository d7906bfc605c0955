//! Command-line front end: lists restaurants with the day's menu, and
//! manages the login session.

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use menu_finder::application::services::{
    MenuAggregator, select_day_menu, visible_courses,
};
use menu_finder::application::use_cases::LoadSessionUseCase;
use menu_finder::application::view_state::ViewState;
use menu_finder::config::AppConfig;
use menu_finder::domain::entities::Restaurant;
use menu_finder::domain::value_objects::{Coordinate, DietTags, LanguageCode, RestaurantId};
use menu_finder::infrastructure::api::{AuthClient, MenuEndpoint, RestaurantApiClient};
use menu_finder::infrastructure::location::{FixedLocation, LocationProvider, NoLocation};
use menu_finder::infrastructure::persistence::FileTokenStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "menu-finder")]
#[command(about = "Find nearby restaurants and today's menus")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, default_value = "menu-finder.toml")]
    config: PathBuf,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List restaurants and their menu for a date
    Menus {
        /// Date to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Comma-separated diet codes, e.g. "VEG,G"
        #[arg(long)]
        diet: Option<String>,
        /// Only restaurants in this city
        #[arg(long)]
        city: Option<String>,
        /// Your latitude
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Your longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Menu language (en or fi)
        #[arg(long)]
        lang: Option<LanguageCode>,
        /// Use the daily menu endpoint
        #[arg(long)]
        daily: bool,
        /// Print the visible restaurants as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one restaurant and its whole menu
    Show {
        /// Restaurant id
        id: String,
        /// Menu language (en or fi)
        #[arg(long)]
        lang: Option<LanguageCode>,
    },
    /// Log in and store the token
    Login {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// Create an account and log in
    Register {
        /// Username
        username: String,
        /// Email address
        email: String,
        /// Password
        password: String,
    },
    /// Check whether a username is free
    Available {
        /// Username
        username: String,
    },
    /// Show the logged-in user
    Whoami,
    /// Forget the stored token
    Logout,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = AppConfig::load(Some(&cli.config)).context("loading configuration")?;

    match cli.command.unwrap_or(Commands::Menus {
        date: None,
        diet: None,
        city: None,
        lat: None,
        lng: None,
        lang: None,
        daily: false,
        json: false,
    }) {
        Commands::Menus {
            date,
            diet,
            city,
            lat,
            lng,
            lang,
            daily,
            json,
        } => {
            let mut config = config;
            if let Some(lang) = lang {
                config.api.language = lang;
            }
            if daily {
                config.api.menu_endpoint = MenuEndpoint::Daily;
            }
            let location = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)?),
                _ => config.user_location()?,
            };
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let diets = diet.as_deref().map(DietTags::parse).unwrap_or_default();

            let view = load_view(&config, location, date).await?;
            let view = view
                .with_diet_filter(diets)
                .with_city_filter(city.unwrap_or_default());
            if json {
                print_json(&view)?;
            } else {
                print_view(&view);
            }
        }
        Commands::Show { id, lang } => {
            let mut config = config;
            if let Some(lang) = lang {
                config.api.language = lang;
            }
            let Some(id) = RestaurantId::parse(&id) else {
                bail!("restaurant id must not be blank");
            };
            let location = config.user_location()?;
            let restaurant = session(&config, location)?.load_restaurant(&id).await?;
            print_details(&restaurant);
        }
        Commands::Login { username, password } => {
            let response = auth_client(&config)?.login(&username, &password).await?;
            match response.user {
                Some(user) => println!("Logged in as {}", user.username),
                None => println!("Logged in"),
            }
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            auth_client(&config)?
                .register(&username, &email, &password)
                .await?;
            println!("Registered and logged in as {username}");
        }
        Commands::Available { username } => {
            if auth_client(&config)?.check_availability(&username).await? {
                println!("{username} is available");
            } else {
                println!("{username} is taken");
            }
        }
        Commands::Whoami => {
            let user = auth_client(&config)?.current_user().await?;
            let role = if user.is_admin() { " (admin)" } else { "" };
            match user.email {
                Some(email) => println!("{} <{email}>{role}", user.username),
                None => println!("{}{role}", user.username),
            }
        }
        Commands::Logout => {
            auth_client(&config)?.logout().await?;
            println!("Logged out");
        }
    }

    Ok(())
}

fn auth_client(config: &AppConfig) -> Result<AuthClient> {
    let tokens = Arc::new(FileTokenStore::new(config.session.token_path.clone()));
    Ok(AuthClient::new(config.http_client()?, tokens))
}

fn session(config: &AppConfig, location: Option<Coordinate>) -> Result<LoadSessionUseCase> {
    let client = Arc::new(
        RestaurantApiClient::new(config.http_client()?).with_menu_endpoint(config.api.menu_endpoint),
    );
    let aggregator = MenuAggregator::new(client.clone(), config.aggregation_config());
    let location: Arc<dyn LocationProvider> = match location {
        Some(coordinate) => Arc::new(FixedLocation::new(coordinate)),
        None => Arc::new(NoLocation),
    };
    Ok(LoadSessionUseCase::new(client, aggregator, location))
}

async fn load_view(
    config: &AppConfig,
    location: Option<Coordinate>,
    date: NaiveDate,
) -> Result<ViewState> {
    let use_case = session(config, location)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let view = use_case.execute_with_cancel(date, &cancel).await?;
    let summary = view.summary();
    if summary.all_failed() {
        bail!("no menu could be loaded ({summary})");
    }
    Ok(view)
}

fn print_view(view: &ViewState) {
    let outcome = view.partition();
    if outcome.is_empty() {
        println!("No restaurants match.");
        return;
    }

    for restaurant in &outcome.with_menu {
        print_restaurant(restaurant, view);
    }
    if !outcome.without_menu.is_empty() {
        println!("Without a menu for {}:", view.selected_date());
        for restaurant in &outcome.without_menu {
            match restaurant.error() {
                Some(error) => println!("  {restaurant} [{error}]"),
                None => println!("  {restaurant}"),
            }
        }
    }
}

fn print_restaurant(restaurant: &Restaurant, view: &ViewState) {
    println!("{restaurant}");
    if let Some(day) = select_day_menu(restaurant, view.selected_date()) {
        for course in visible_courses(day, view.diet_filter()) {
            println!("  - {course}");
        }
    }
}

fn print_details(restaurant: &Restaurant) {
    println!("{restaurant}");
    if let Some(company) = restaurant.company() {
        println!("  {company}");
    }
    if let Some(phone) = restaurant.phone() {
        println!("  tel. {phone}");
    }
    match (restaurant.menu(), restaurant.error()) {
        (Some(menu), _) if menu.is_empty() => println!("  No menu available."),
        (Some(menu), _) => {
            for day in &menu.days {
                println!("  {}", day.label);
                for course in &day.courses {
                    println!("    - {course}");
                }
            }
        }
        (None, Some(error)) => println!("  Menu unavailable: {error}"),
        (None, None) => println!("  Menu not loaded."),
    }
}

fn print_json(view: &ViewState) -> Result<()> {
    let outcome = view.partition();
    let visible: Vec<&Restaurant> = outcome
        .with_menu
        .iter()
        .chain(outcome.without_menu.iter())
        .copied()
        .collect();
    println!("{}", serde_json::to_string_pretty(&visible)?);
    Ok(())
}
