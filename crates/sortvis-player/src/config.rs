//! Player configuration.

use std::net::SocketAddr;
use std::time::Duration;

use sortvis_trace::{parse_values, Algorithm};

use crate::error::{Error, Result};
use crate::playback::MAX_BASE_INTERVAL;

/// Step interval at rate level 0.
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(400);

/// Data shown before any client loads its own.
pub const DEFAULT_VALUES: [f64; 9] = [5.0, 3.0, 8.0, 1.0, 9.0, 2.0, 7.0, 4.0, 6.0];

/// Configuration for a player session and its server.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Auto-advance interval at rate level 0
    pub base_interval: Duration,

    /// HTTP listen address
    pub addr: SocketAddr,

    /// Algorithm loaded at startup
    pub algorithm: Algorithm,

    /// Values loaded at startup
    pub values: Vec<f64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_interval: DEFAULT_BASE_INTERVAL,
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            algorithm: Algorithm::BubbleSort,
            values: DEFAULT_VALUES.to_vec(),
        }
    }
}

impl PlayerConfig {
    /// Create config from environment variables, falling back to defaults.
    ///
    /// - `SORTVIS_BASE_INTERVAL_MS`: interval at rate 0 (1 to 60000)
    /// - `SORTVIS_ADDR`: listen address
    /// - `SORTVIS_ALGORITHM`: startup algorithm
    /// - `SORTVIS_VALUES`: comma separated startup values
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(ms) = lookup("SORTVIS_BASE_INTERVAL_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("SORTVIS_BASE_INTERVAL_MS: {ms:?}")))?;
            let interval = Duration::from_millis(ms);
            if ms == 0 || interval > MAX_BASE_INTERVAL {
                return Err(Error::Config(format!(
                    "SORTVIS_BASE_INTERVAL_MS must be between 1 and {}",
                    MAX_BASE_INTERVAL.as_millis()
                )));
            }
            config.base_interval = interval;
        }

        if let Some(addr) = lookup("SORTVIS_ADDR") {
            config.addr = addr
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("SORTVIS_ADDR: {addr:?}")))?;
        }

        if let Some(name) = lookup("SORTVIS_ALGORITHM") {
            config.algorithm = name.parse()?;
        }

        if let Some(values) = lookup("SORTVIS_VALUES") {
            config.values = parse_values(&values)?;
        }

        Ok(config)
    }

    /// Replace the listen port, keeping the host.
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = PlayerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.base_interval, Duration::from_millis(400));
    }

    #[test]
    fn reads_every_key() {
        let config = PlayerConfig::from_lookup(lookup(&[
            ("SORTVIS_BASE_INTERVAL_MS", "250"),
            ("SORTVIS_ADDR", "127.0.0.1:8080"),
            ("SORTVIS_ALGORITHM", "quick-sort"),
            ("SORTVIS_VALUES", "3, 1, 2"),
        ]))
        .unwrap();

        assert_eq!(config.base_interval, Duration::from_millis(250));
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.algorithm, Algorithm::QuickSort);
        assert_eq!(config.values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            PlayerConfig::from_lookup(lookup(&[("SORTVIS_BASE_INTERVAL_MS", "0")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            PlayerConfig::from_lookup(lookup(&[(
                "SORTVIS_BASE_INTERVAL_MS",
                "18446744073709551615"
            )])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            PlayerConfig::from_lookup(lookup(&[("SORTVIS_ADDR", "nowhere")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            PlayerConfig::from_lookup(lookup(&[("SORTVIS_ALGORITHM", "bogo")])),
            Err(Error::Trace(_))
        ));
    }

    #[test]
    fn port_override() {
        let config = PlayerConfig::default().with_port(9999);
        assert_eq!(config.addr.port(), 9999);
    }
}
