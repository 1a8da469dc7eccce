use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use tokio::task::JoinSet;
use wearcast_core::{Config, OpenMeteoSource, Place, PlaceQuery, WeatherSource, analyze};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "wearcast",
    version,
    about = "Outfit and health advice from current weather"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show outfit and health advice for a city.
    Advise {
        /// City name; falls back to the configured default city.
        city: Option<String>,

        /// Take the best geocoding match without asking.
        #[arg(long)]
        first: bool,

        /// Print the full report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show one-line advice for every featured city.
    Featured,

    /// Set the default city and the featured city list.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let source = OpenMeteoSource::new();

        match self.command {
            Command::Advise { city, first, json } => {
                advise(&config, &source, city, first, json).await
            }
            Command::Featured => featured(&config, source).await,
            Command::Configure => configure(config),
        }
    }
}

async fn advise(
    config: &Config,
    source: &dyn WeatherSource,
    city: Option<String>,
    first: bool,
    json: bool,
) -> Result<()> {
    let city = match city.or_else(|| config.default_city.clone()) {
        Some(c) => c,
        None => Text::new("Which city?")
            .prompt()
            .context("City prompt was cancelled")?,
    };

    let query = PlaceQuery {
        name: city.clone(),
        limit: config.max_candidates,
        language: config.language.clone(),
    };

    let candidates = source.search_places(&query).await?;
    let place = pick_place(candidates, &city, first)?;

    let conditions = source.current_conditions(&place).await?;
    let advice = analyze(&conditions.sample());

    if json {
        println!("{}", render::report_json(&place, &conditions, &advice)?);
    } else {
        println!("{}", render::advice_card(&place, &conditions, &advice));
    }

    Ok(())
}

/// A geocoding candidate as shown in the picker.
struct Candidate(Place);

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.label())
    }
}

fn pick_place(candidates: Vec<Place>, city: &str, first: bool) -> Result<Place> {
    let mut candidates = candidates;

    if candidates.is_empty() {
        bail!("No place matched '{city}'. Check the spelling and try again.");
    }

    if first || candidates.len() == 1 {
        return Ok(candidates.remove(0));
    }

    let options: Vec<Candidate> = candidates.into_iter().map(Candidate).collect();
    let chosen = Select::new("Which one did you mean?", options)
        .prompt()
        .context("Place selection was cancelled")?;

    Ok(chosen.0)
}

async fn featured(config: &Config, source: OpenMeteoSource) -> Result<()> {
    if config.featured.is_empty() {
        println!("No featured cities configured. Run `wearcast configure` to add some.");
        return Ok(());
    }

    let source = Arc::new(source);
    let mut tasks = JoinSet::new();

    for (idx, city) in config.featured.iter().cloned().enumerate() {
        let source = Arc::clone(&source);
        let query = PlaceQuery {
            name: city.clone(),
            limit: 1,
            language: config.language.clone(),
        };

        tasks.spawn(async move {
            let outcome = lookup_one(source.as_ref(), query).await;
            (idx, city, outcome)
        });
    }

    // Lookups finish in any order; lines are printed in list order.
    let mut rows: Vec<Option<String>> = vec![None; config.featured.len()];
    while let Some(joined) = tasks.join_next().await {
        let (idx, city, outcome) = joined.context("Featured lookup task panicked")?;
        rows[idx] = Some(match outcome {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(%city, error = %err, "featured lookup failed");
                render::failure_line(&city, &err)
            }
        });
    }

    for row in rows.into_iter().flatten() {
        println!("{row}");
    }

    Ok(())
}

async fn lookup_one(source: &dyn WeatherSource, query: PlaceQuery) -> Result<String> {
    let city = query.name.clone();

    let mut candidates = source.search_places(&query).await?;
    if candidates.is_empty() {
        bail!("no place matched '{city}'");
    }

    let place = candidates.remove(0);
    let conditions = source.current_conditions(&place).await?;
    let advice = analyze(&conditions.sample());

    Ok(render::featured_line(&place, &conditions, &advice))
}

fn configure(mut config: Config) -> Result<()> {
    let current_default = config.default_city.clone().unwrap_or_default();
    let default_city = Text::new("Default city (leave empty for none):")
        .with_initial_value(&current_default)
        .prompt()
        .context("Configuration was cancelled")?;
    config.set_default_city(Some(default_city));

    let current_featured = config.featured.join(", ");
    let featured = Text::new("Featured cities (comma separated):")
        .with_initial_value(&current_featured)
        .prompt()
        .context("Configuration was cancelled")?;
    config.set_featured(featured.split(','));

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}
