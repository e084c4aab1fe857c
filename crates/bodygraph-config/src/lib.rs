use bodygraph::chart::{ChartSettings, DEFAULT_DESIGN_OFFSET_DAYS};
use bodygraph::ephemeris::GeoLocation;
use bodygraph::gates::ZodiacSystem;
use kamea::solver::DEFAULT_MAX_ATTEMPTS;
use kamea::{SearchStrategy, SolveBudget};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Relative locations tried for the settings file, from the repo root and
/// from inside a crate directory.
pub const CONFIG_PATHS: [&str; 2] = ["configs/bodygraph.toml", "../../configs/bodygraph.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub chart: ChartSettings,
    /// Default place when a command gives no coordinates
    pub location: Option<GeoLocation>,
    pub solver: SolverSettings,
    pub interpretation_data: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverSettings {
    pub max_attempts: u64,
    pub timeout: Option<Duration>,
    pub strategy: SearchStrategy,
    pub seed: Option<u64>,
}

impl SolverSettings {
    pub fn budget(&self) -> SolveBudget {
        SolveBudget {
            max_attempts: self.max_attempts,
            timeout: self.timeout,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chart: ChartSettings::default(),
            location: None,
            solver: SolverSettings {
                max_attempts: DEFAULT_MAX_ATTEMPTS,
                timeout: None,
                strategy: SearchStrategy::Random,
                seed: None,
            },
            interpretation_data: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartToml>,
    #[serde(default)]
    location: Option<LocationToml>,
    #[serde(default)]
    solver: Option<SolverToml>,
    #[serde(default)]
    interpretation: Option<InterpretationToml>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default)]
    zodiac: Option<String>,
    #[serde(default = "default_design_offset")]
    design_offset_days: f64,
}

fn default_design_offset() -> f64 {
    DEFAULT_DESIGN_OFFSET_DAYS
}

#[derive(Debug, Clone, Deserialize)]
struct LocationToml {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct SolverToml {
    #[serde(default = "default_max_attempts")]
    max_attempts: u64,
    #[serde(default)]
    timeout_ms: Option<u64>,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
}

fn default_max_attempts() -> u64 {
    DEFAULT_MAX_ATTEMPTS
}

#[derive(Debug, Clone, Deserialize)]
struct InterpretationToml {
    #[serde(default)]
    data_path: Option<PathBuf>,
}

/// Text of the first settings file found, `None` when there is none.
pub fn read_config_toml_text() -> anyhow::Result<Option<String>> {
    for p in &CONFIG_PATHS {
        let path = Path::new(p);
        if path.exists() {
            let text = fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
            log::debug!("using settings from {}", path.display());
            return Ok(Some(text));
        }
    }
    Ok(None)
}

/// Load settings from the default locations. A missing file gives defaults.
pub fn load_settings() -> anyhow::Result<Settings> {
    match read_config_toml_text()? {
        Some(text) => parse_settings(&text),
        None => {
            log::debug!("no settings file in {:?}, using defaults", CONFIG_PATHS);
            Ok(Settings::default())
        }
    }
}

/// Load settings from an explicit file, which must exist.
pub fn load_settings_from(path: &Path) -> anyhow::Result<Settings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    parse_settings(&text)
}

pub fn parse_settings(text: &str) -> anyhow::Result<Settings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse bodygraph.toml: {e}"))?;
    let mut settings = Settings::default();

    if let Some(chart) = root.chart {
        let zodiac = match chart.zodiac {
            Some(name) => name
                .parse::<ZodiacSystem>()
                .map_err(|e| anyhow::anyhow!("chart.zodiac: {e}"))?,
            None => ZodiacSystem::default(),
        };
        settings.chart = ChartSettings {
            zodiac,
            design_offset_days: chart.design_offset_days,
        };
        settings
            .chart
            .validate()
            .map_err(|e| anyhow::anyhow!("[chart]: {e}"))?;
    }

    if let Some(LocationToml { lat, lon }) = root.location {
        let location =
            GeoLocation::new(lat, lon).map_err(|e| anyhow::anyhow!("[location]: {e}"))?;
        settings.location = Some(location);
    }

    if let Some(solver) = root.solver {
        let strategy = match solver.strategy {
            Some(name) => name
                .parse::<SearchStrategy>()
                .map_err(|e| anyhow::anyhow!("solver.strategy: {e}"))?,
            None => SearchStrategy::default(),
        };
        if solver.timeout_ms == Some(0) {
            anyhow::bail!("solver.timeout_ms must be positive; omit it for no timeout");
        }
        settings.solver = SolverSettings {
            max_attempts: solver.max_attempts,
            timeout: solver.timeout_ms.map(Duration::from_millis),
            strategy,
            seed: solver.seed,
        };
    }

    if let Some(interpretation) = root.interpretation {
        settings.interpretation_data = interpretation.data_path;
    }

    Ok(settings)
}
