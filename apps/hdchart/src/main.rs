mod render;

use anyhow::Context;
use bodygraph::chart::{build_chart, transit, ChartSettings};
use bodygraph::ephemeris::GeoLocation;
use bodygraph::gates::{decode_with, DmsReference, ZodiacSystem};
use bodygraph::interpretation::{HdCoordinate, ReferenceTable};
use bodygraph::time::parse_instant;
use bodygraph_config::{load_settings, load_settings_from, Settings};
use clap::{Parser, Subcommand, ValueEnum};
use kamea::{evaluate_flat, seed_from_intent, PlanetarySphere, Resident, ResidentSolver, SearchStrategy};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Zodiac {
    Tropical,
    Sidereal,
    Draco,
}

impl From<Zodiac> for ZodiacSystem {
    fn from(z: Zodiac) -> Self {
        match z {
            Zodiac::Tropical => ZodiacSystem::Tropical,
            Zodiac::Sidereal => ZodiacSystem::Sidereal,
            Zodiac::Draco => ZodiacSystem::Draco,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    Random,
    Constructive,
}

impl From<Strategy> for SearchStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Random => SearchStrategy::Random,
            Strategy::Constructive => SearchStrategy::Constructive,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Settings file. Defaults to configs/bodygraph.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, global = true, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a chart for a birth date/time and place.
    Chart {
        /// UTC date/time, RFC 3339 or YYYY-MM-DDTHH:MM
        #[arg(long)]
        at: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
        #[arg(long, value_enum)]
        zodiac: Option<Zodiac>,
        #[arg(long)]
        design_offset_days: Option<f64>,
        /// Attach the reference meaning of every activation.
        #[arg(long, default_value_t = false)]
        meanings: bool,
    },
    /// Fast-moving bodies at an instant (now by default).
    Transit {
        #[arg(long)]
        at: Option<String>,
        #[arg(long, value_enum)]
        zodiac: Option<Zodiac>,
    },
    /// Decode one ecliptic longitude.
    Decode {
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        /// Degree split over the whole circle instead of within the sign.
        #[arg(long, default_value_t = false)]
        absolute: bool,
    },
    /// Look up the meaning of a gate.line.color.tone.base coordinate.
    Meaning {
        #[arg(long)]
        gate: u8,
        #[arg(long, default_value_t = 1)]
        line: u8,
        #[arg(long, default_value_t = 1)]
        color: u8,
        #[arg(long, default_value_t = 1)]
        tone: u8,
        #[arg(long, default_value_t = 1)]
        base: u8,
    },
    /// Search for a magic square honouring fixed resident cells.
    Square {
        #[arg(long, conflicts_with = "sphere")]
        size: Option<usize>,
        /// Planetary kamea order (saturn=3 ... moon=9).
        #[arg(long)]
        sphere: Option<PlanetarySphere>,
        /// Fixed cell as row,col,value (0-indexed). Repeatable.
        #[arg(long = "resident")]
        residents: Vec<Resident>,
        /// Phrase hashed into the random seed.
        #[arg(long)]
        intent: Option<String>,
        #[arg(long)]
        max_attempts: Option<u64>,
        #[arg(long)]
        timeout_ms: Option<u64>,
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,
    },
    /// Check whether n² values (row by row) form a magic square.
    Check {
        #[arg(required = true, value_delimiter = ',', num_args = 1..)]
        values: Vec<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings()?,
    };

    match args.command {
        Command::Chart {
            at,
            lat,
            lon,
            zodiac,
            design_offset_days,
            meanings,
        } => {
            let birth = parse_instant(&at)?;
            let location = resolve_location(lat, lon, &settings)?;
            let mut chart_settings = settings.chart;
            if let Some(z) = zodiac {
                chart_settings.zodiac = z.into();
            }
            if let Some(days) = design_offset_days {
                chart_settings.design_offset_days = days;
            }

            let chart = build_chart(birth, &location, &chart_settings)?;
            let meanings = if meanings {
                let table = load_table(&settings)?;
                let mut rows = Vec::new();
                for activation in chart.personality.iter().chain(chart.design.iter()) {
                    rows.push(table.lookup(&HdCoordinate::from(&activation.coordinate))?);
                }
                Some(rows)
            } else {
                None
            };

            match args.format {
                Format::Json => {
                    let value = match &meanings {
                        Some(rows) => serde_json::json!({ "chart": chart, "meanings": rows }),
                        None => serde_json::to_value(&chart)?,
                    };
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                Format::Text => {
                    print!("{}", render::chart_text(&chart));
                    if let Some(rows) = &meanings {
                        print!("{}", render::meanings_text(&chart, rows));
                    }
                }
            }
        }
        Command::Transit { at, zodiac } => {
            let instant = match at {
                Some(text) => parse_instant(&text)?,
                None => chrono::Utc::now(),
            };
            let chart_settings = ChartSettings {
                zodiac: zodiac.map(Into::into).unwrap_or(settings.chart.zodiac),
                ..settings.chart
            };
            let snapshot = transit(instant, &chart_settings);
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                Format::Text => print!("{}", render::transit_text(&snapshot)),
            }
        }
        Command::Decode { longitude, absolute } => {
            if !longitude.is_finite() {
                anyhow::bail!("longitude must be a finite number, got {}", longitude);
            }
            let reference = if absolute {
                DmsReference::Absolute
            } else {
                DmsReference::Sign
            };
            let coordinate = decode_with(longitude, reference);
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&coordinate)?),
                Format::Text => print!("{}", render::coordinate_text(longitude, &coordinate)),
            }
        }
        Command::Meaning {
            gate,
            line,
            color,
            tone,
            base,
        } => {
            let table = load_table(&settings)?;
            let coordinate = HdCoordinate::new(gate, line, color, tone, base);
            let meaning = table.lookup(&coordinate)?;
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&meaning)?),
                Format::Text => print!("{}", render::meaning_text(&coordinate, &meaning)),
            }
        }
        Command::Square {
            size,
            sphere,
            residents,
            intent,
            max_attempts,
            timeout_ms,
            strategy,
        } => {
            let size = size.or(sphere.map(|s| s.size())).unwrap_or(3);
            let mut budget = settings.solver.budget();
            if let Some(n) = max_attempts {
                budget.max_attempts = n;
            }
            if let Some(ms) = timeout_ms {
                budget.timeout = Some(Duration::from_millis(ms));
            }
            let strategy = strategy.map(Into::into).unwrap_or(settings.solver.strategy);

            let mut solver = ResidentSolver::new(size, residents)?
                .with_budget(budget)
                .with_strategy(strategy);
            if let Some(text) = &intent {
                solver = solver.with_seed(seed_from_intent(text));
            } else if let Some(seed) = settings.solver.seed {
                solver = solver.with_seed_u64(seed);
            }

            let token = solver.cancel_token();
            let mut handle = tokio::spawn(kamea::solve_async(solver));
            let outcome = tokio::select! {
                joined = &mut handle => joined.context("solver task panicked")??,
                _ = tokio::signal::ctrl_c() => {
                    log::info!("interrupt received, stopping solver");
                    token.cancel();
                    handle.await.context("solver task panicked")??
                }
            };

            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
                Format::Text => print!("{}", render::solve_text(&outcome)),
            }
        }
        Command::Check { values } => {
            let square = evaluate_flat(&values)?;
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&square)?),
                Format::Text => print!("{}", render::square_text(&square)),
            }
        }
    }

    Ok(())
}

fn resolve_location(lat: Option<f64>, lon: Option<f64>, settings: &Settings) -> anyhow::Result<GeoLocation> {
    match (lat, lon, settings.location) {
        (Some(lat), Some(lon), _) => Ok(GeoLocation::new(lat, lon)?),
        (None, None, Some(location)) => Ok(location),
        (None, None, None) => {
            anyhow::bail!("No location given: pass --lat and --lon or set [location] in bodygraph.toml")
        }
        _ => anyhow::bail!("--lat and --lon must be given together"),
    }
}

fn load_table(settings: &Settings) -> anyhow::Result<ReferenceTable> {
    match &settings.interpretation_data {
        Some(path) => ReferenceTable::from_path(path)
            .with_context(|| format!("loading interpretation data from {}", path.display())),
        None => Ok(ReferenceTable::builtin()?.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_with_negative_longitude() {
        let args = Args::try_parse_from([
            "hdchart", "chart", "--at", "1990-01-01T12:00", "--lat", "37.7749", "--lon", "-122.4194",
        ])
        .unwrap();
        match args.command {
            Command::Chart { lon, .. } => assert_eq!(lon, Some(-122.4194)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_square_residents() {
        let args = Args::try_parse_from([
            "hdchart", "--format", "json", "square", "--sphere", "saturn", "--resident", "1,1,5",
        ])
        .unwrap();
        match args.command {
            Command::Square { sphere, residents, .. } => {
                assert_eq!(sphere, Some(PlanetarySphere::Saturn));
                assert_eq!(residents, vec![Resident::new(1, 1, 5)]);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Args::try_parse_from(["hdchart", "square", "--size", "3", "--sphere", "mars"]).is_err());
    }

    #[test]
    fn test_resolve_location() {
        let settings = Settings::default();
        assert!(resolve_location(None, None, &settings).is_err());
        assert!(resolve_location(Some(1.0), None, &settings).is_err());
        assert_eq!(
            resolve_location(Some(10.0), Some(20.0), &settings).unwrap(),
            GeoLocation { lat: 10.0, lon: 20.0 }
        );
        let with_default = Settings {
            location: Some(GeoLocation { lat: 1.0, lon: 2.0 }),
            ..Settings::default()
        };
        assert_eq!(
            resolve_location(None, None, &with_default).unwrap().lon,
            2.0
        );
    }
}
