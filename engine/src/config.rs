use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::filter::ZoneSelection;
use crate::rng::DEFAULT_SEED;
use crate::types::TimeRange;

/// Default tick cadence of the perturbation scheduler.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Session configuration supplied by the dashboard shell.
///
/// `time_range` bounds the time-series window, `selected_zones` narrows what
/// readers see, `demo_mode` raises volatility and alert injection. The engine
/// only ever changes state through these knobs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub time_range: TimeRange,
    pub selected_zones: ZoneSelection,
    pub demo_mode: bool,
}

impl SimConfig {
    /// Random-walk scale applied to every zone step.
    pub fn volatility(&self) -> f64 {
        if self.demo_mode { 1.5 } else { 1.0 }
    }

    /// Per-tick probability of synthesizing a new alert.
    pub fn alert_probability(&self) -> f64 {
        if self.demo_mode { 0.30 } else { 0.15 }
    }

    /// Amount added to a zone's unattended alert count when it is bumped.
    pub fn alert_bump(&self) -> u32 {
        if self.demo_mode { 2 } else { 1 }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Seed the generator is reset to at session start.
    ///
    /// Same seed + same configuration + same tick count => same snapshot.
    pub seed: u32,

    /// Scheduler cadence. The dashboard ticks every 5 seconds.
    pub tick_interval: Duration,

    /// Initial session configuration.
    pub sim: SimConfig,

    /// Directory backing the media registry's key/value store.
    pub media_dir: PathBuf,

    /// Emit JSON logs instead of the pretty formatter.
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tick_interval: DEFAULT_TICK_INTERVAL,
            sim: SimConfig::default(),
            media_dir: PathBuf::from(".curbsim"),
            json_logs: false,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the environment, falling back to defaults
    /// for unset variables. Set-but-malformed values are rejected.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let mut cfg = Self::default();

        if let Some(v) = get("CURB_SEED") {
            cfg.seed = v.trim().parse().map_err(|_| EngineError::InvalidEnv {
                key: "CURB_SEED",
                value: v.clone(),
            })?;
        }

        if let Some(v) = get("CURB_TICK_MS") {
            let ms: u64 = v
                .trim()
                .parse()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| EngineError::InvalidEnv {
                    key: "CURB_TICK_MS",
                    value: v.clone(),
                })?;
            cfg.tick_interval = Duration::from_millis(ms);
        }

        if let Some(v) = get("CURB_TIME_RANGE") {
            cfg.sim.time_range = v.parse()?;
        }

        if let Some(v) = get("CURB_ZONES") {
            cfg.sim.selected_zones = ZoneSelection::from_names(v.split(','));
        }

        if let Some(v) = get("CURB_DEMO_MODE") {
            cfg.sim.demo_mode = parse_bool(&v).ok_or(EngineError::InvalidEnv {
                key: "CURB_DEMO_MODE",
                value: v.clone(),
            })?;
        }

        if let Some(v) = get("CURB_MEDIA_DIR") {
            cfg.media_dir = PathBuf::from(v);
        }

        cfg.json_logs = get("APP_ENV").is_some_and(|v| v == "production");

        Ok(cfg)
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::types::ZoneName;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(cfg.seed, 12345);
        assert_eq!(cfg.tick_interval, Duration::from_secs(5));
        assert_eq!(cfg.sim.time_range, TimeRange::FourHours);
        assert!(cfg.sim.selected_zones.is_all());
        assert!(!cfg.sim.demo_mode);
        assert!(!cfg.json_logs);
    }

    #[test]
    fn reads_every_knob() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("CURB_SEED", "7"),
            ("CURB_TICK_MS", "250"),
            ("CURB_TIME_RANGE", "24h"),
            ("CURB_ZONES", "Pickup,ADA"),
            ("CURB_DEMO_MODE", "true"),
            ("CURB_MEDIA_DIR", "/tmp/media"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.tick_interval, Duration::from_millis(250));
        assert_eq!(cfg.sim.time_range, TimeRange::Day);
        assert!(cfg.sim.selected_zones.contains(ZoneName::Ada));
        assert!(!cfg.sim.selected_zones.contains(ZoneName::Shuttle));
        assert!(cfg.sim.demo_mode);
        assert_eq!(cfg.media_dir, PathBuf::from("/tmp/media"));
        assert!(cfg.json_logs);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = AppConfig::from_lookup(lookup(&[("CURB_TICK_MS", "0")])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidEnv { key: "CURB_TICK_MS", .. }));

        let err = AppConfig::from_lookup(lookup(&[("CURB_DEMO_MODE", "maybe")])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidEnv { key: "CURB_DEMO_MODE", .. }));

        let err = AppConfig::from_lookup(lookup(&[("CURB_TIME_RANGE", "2d")])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTimeRange(_)));
    }

    #[test]
    fn demo_mode_switches_tick_parameters() {
        let mut sim = SimConfig::default();
        assert_eq!(
            (sim.volatility(), sim.alert_probability(), sim.alert_bump()),
            (1.0, 0.15, 1)
        );

        sim.demo_mode = true;
        assert_eq!(
            (sim.volatility(), sim.alert_probability(), sim.alert_bump()),
            (1.5, 0.30, 2)
        );
    }
}
