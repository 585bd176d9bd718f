use serde::{Deserialize, Serialize};

use crate::window::DEFAULT_WINDOW_CAPACITY;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    /// Monitored services, in display order.
    #[serde(default = "default_services")]
    pub services: Vec<ServiceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Max number of snapshots buffered for /ws/dashboard (slow clients may lag).
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
    /// How often to log worker stats at INFO level.
    #[serde(default = "default_stats_log_interval_secs")]
    pub stats_log_interval_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_capacity: default_window_capacity(),
            tick_interval_ms: default_tick_interval_ms(),
            broadcast_capacity: default_broadcast_capacity(),
            stats_log_interval_secs: default_stats_log_interval_secs(),
        }
    }
}

fn default_window_capacity() -> usize {
    DEFAULT_WINDOW_CAPACITY
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_broadcast_capacity() -> usize {
    16
}

fn default_stats_log_interval_secs() -> u64 {
    60
}

/// Shape of the simulated RPS signal: `base + sin(t / period) * variation + noise`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_base_rps")]
    pub base_rps: f64,
    #[serde(default = "default_variation")]
    pub variation: f64,
    #[serde(default = "default_period_ms")]
    pub period_ms: f64,
    /// Peak-to-peak width of the uniform noise term.
    #[serde(default = "default_noise")]
    pub noise: f64,
    /// Fixed RNG seed; when absent the feed seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_rps: default_base_rps(),
            variation: default_variation(),
            period_ms: default_period_ms(),
            noise: default_noise(),
            seed: None,
        }
    }
}

fn default_base_rps() -> f64 {
    60.0
}

fn default_variation() -> f64 {
    30.0
}

fn default_period_ms() -> f64 {
    10_000.0
}

fn default_noise() -> f64 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub id: String,
    /// Human-readable label; falls back to `id`.
    #[serde(default)]
    pub name: Option<String>,
    /// Chance that a simulated probe reports an active failure.
    #[serde(default)]
    pub failure_probability: f64,
    /// Chance that a simulated probe gets no answer at all.
    #[serde(default)]
    pub no_signal_probability: f64,
}

impl ServiceConfig {
    pub fn new(id: impl Into<String>, failure_probability: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            failure_probability,
            no_signal_probability: 0.0,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

fn default_services() -> Vec<ServiceConfig> {
    vec![
        ServiceConfig {
            name: Some("Ingress proxy".into()),
            ..ServiceConfig::new("ingress-proxy", 0.05)
        },
        ServiceConfig {
            name: Some("Data store".into()),
            ..ServiceConfig::new("data-store", 0.03)
        },
    ]
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.dashboard.window_capacity > 0,
            "dashboard.window_capacity must be > 0, got {}",
            self.dashboard.window_capacity
        );
        anyhow::ensure!(
            self.dashboard.tick_interval_ms > 0,
            "dashboard.tick_interval_ms must be > 0, got {}",
            self.dashboard.tick_interval_ms
        );
        anyhow::ensure!(
            self.dashboard.broadcast_capacity > 0,
            "dashboard.broadcast_capacity must be > 0, got {}",
            self.dashboard.broadcast_capacity
        );
        anyhow::ensure!(
            self.dashboard.stats_log_interval_secs > 0,
            "dashboard.stats_log_interval_secs must be > 0, got {}",
            self.dashboard.stats_log_interval_secs
        );
        anyhow::ensure!(
            self.feed.period_ms > 0.0,
            "feed.period_ms must be > 0, got {}",
            self.feed.period_ms
        );
        anyhow::ensure!(
            self.feed.noise >= 0.0,
            "feed.noise must be >= 0, got {}",
            self.feed.noise
        );

        let mut seen = std::collections::HashSet::new();
        for service in &self.services {
            anyhow::ensure!(!service.id.is_empty(), "services.id must be non-empty");
            anyhow::ensure!(
                seen.insert(service.id.as_str()),
                "services.id must be unique, got duplicate {:?}",
                service.id
            );
            anyhow::ensure!(
                (0.0..=1.0).contains(&service.failure_probability),
                "services.failure_probability for {} must be within [0, 1], got {}",
                service.id,
                service.failure_probability
            );
            anyhow::ensure!(
                (0.0..=1.0).contains(&service.no_signal_probability),
                "services.no_signal_probability for {} must be within [0, 1], got {}",
                service.id,
                service.no_signal_probability
            );
            anyhow::ensure!(
                service.failure_probability + service.no_signal_probability <= 1.0,
                "services.failure_probability + no_signal_probability for {} must not exceed 1",
                service.id
            );
        }
        Ok(())
    }
}
