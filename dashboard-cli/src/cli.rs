use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use dashboard_core::{Config, Dashboard, TemperatureUnit, WeatherProvider, provider_from_config};
use inquire::{Password, PasswordDisplayMode, Select};
use std::path::PathBuf;

use crate::{charts::ChartBoard, interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Raise log verbosity (-v, -vv). `RUST_LOG` overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and display preferences.
    Configure,

    /// Add the given cities and print one page of the dashboard.
    Show {
        /// City names, added in order.
        #[arg(required = true)]
        cities: Vec<String>,

        /// "celsius" or "fahrenheit"; defaults to the configured unit.
        #[arg(long)]
        unit: Option<String>,

        /// 1-based page to print.
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Write each visible card's history chart as `<city>.svg` here.
        #[arg(long)]
        chart_dir: Option<PathBuf>,
    },

    /// Run the interactive dashboard.
    Dashboard {
        /// "celsius" or "fahrenheit"; defaults to the configured unit.
        #[arg(long)]
        unit: Option<String>,

        /// Directory charts are saved to from the menu.
        #[arg(long)]
        chart_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                cities,
                unit,
                page,
                chart_dir,
            } => {
                let mut dashboard = open_dashboard(unit.as_deref())?;
                show(&mut dashboard, &cities, page, chart_dir).await
            }
            Command::Dashboard { unit, chart_dir } => {
                let dashboard = open_dashboard(unit.as_deref())?;
                interactive::run(dashboard, chart_dir).await
            }
        }
    }
}

fn open_dashboard(unit: Option<&str>) -> anyhow::Result<Dashboard<Box<dyn WeatherProvider>>> {
    let cfg = Config::load()?;
    let provider = provider_from_config(&cfg)?;
    let unit = match unit {
        Some(u) => TemperatureUnit::try_from(u)?,
        None => cfg.unit(),
    };
    Ok(Dashboard::with_settings(provider, unit, cfg.pagination()))
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut cfg = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    cfg.set_api_key(api_key.trim().to_string());

    let units = vec![TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];
    let start = units.iter().position(|u| *u == cfg.unit()).unwrap_or(0);
    let unit = Select::new("Default temperature unit:", units)
        .with_starting_cursor(start)
        .prompt()?;
    cfg.unit = Some(unit);

    cfg.save_to(&path)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show<P: WeatherProvider>(
    dashboard: &mut Dashboard<P>,
    cities: &[String],
    page: usize,
    chart_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    for city in cities {
        dashboard.set_search(city.as_str());
        dashboard.add_city().await;
    }
    dashboard.set_page(page);

    let mut charts = ChartBoard::default();
    charts.sync(dashboard).await;

    print!("{}", render::dashboard(&dashboard.view(), &charts));

    if let Some(dir) = chart_dir {
        let written = charts
            .write_svgs(dashboard, &dir)
            .with_context(|| format!("Failed to save charts to {}", dir.display()))?;
        for path in written {
            println!("Saved chart {}", path.display());
        }
    }

    Ok(())
}
