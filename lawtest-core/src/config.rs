//! Checker configuration.
//!
//! [`ConfigBuilder`] validates parameters before producing an immutable
//! [`Config`]. Environment overrides follow the same policy as the property
//! suites: invalid values are logged and replaced with the default.

use std::{env, num::NonZeroUsize, time::Duration};

use tracing::warn;

use crate::error::ConfigError;

/// Environment variable overriding the number of trials per check.
pub const CASES_ENV_KEY: &str = "LAWTEST_CASES";
/// Environment variable overriding the per-check timeout, in milliseconds.
pub const TIMEOUT_ENV_KEY: &str = "LAWTEST_TIMEOUT_MS";
/// Environment variable pinning the seed for every check.
pub const SEED_ENV_KEY: &str = "LAWTEST_SEED";

const DEFAULT_TEST_CASES: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Parameters shared by every check run through a [`crate::Checker`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use lawtest_core::Config;
///
/// let config = Config::default();
/// assert_eq!(config.test_cases().get(), 100);
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// assert_eq!(config.seed(), None);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    test_cases: NonZeroUsize,
    timeout: Duration,
    seed: Option<u64>,
}

impl Config {
    /// Loads a configuration from `LAWTEST_CASES`, `LAWTEST_TIMEOUT_MS` and
    /// `LAWTEST_SEED`, falling back to the defaults for unset or invalid
    /// values.
    #[must_use]
    pub fn from_env() -> Self {
        ConfigBuilder::from_env().build().unwrap_or_else(|error| {
            warn!(error = %error, "invalid lawtest environment configuration; using defaults");
            Self::default()
        })
    }

    /// Number of independent trials each check performs.
    #[must_use]
    pub fn test_cases(&self) -> NonZeroUsize {
        self.test_cases
    }

    /// Wall-clock budget for a single check.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fixed seed, when the caller pinned one.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the pinned seed or draws a fresh one from entropy.
    pub(crate) fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random::<u64>)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_cases: DEFAULT_TEST_CASES,
            timeout: DEFAULT_TIMEOUT,
            seed: None,
        }
    }
}

/// Configures and constructs [`Config`] instances.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use lawtest_core::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_test_cases(500)
///     .with_timeout(Duration::from_secs(1))
///     .with_seed(42)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(config.test_cases().get(), 500);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ConfigBuilder {
    test_cases: usize,
    timeout: Duration,
    seed: Option<u64>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            test_cases: DEFAULT_TEST_CASES.get(),
            timeout: DEFAULT_TIMEOUT,
            seed: None,
        }
    }
}

impl ConfigBuilder {
    /// Creates a builder populated with the defaults (100 trials, 5 s).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded from the `LAWTEST_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            test_cases: read_env_or_default(CASES_ENV_KEY, defaults.test_cases, parse_cases),
            timeout: read_env_or_default(TIMEOUT_ENV_KEY, defaults.timeout, parse_timeout),
            seed: read_env_or_default(SEED_ENV_KEY, defaults.seed, parse_seed),
        }
    }

    /// Overrides the number of trials per check.
    #[must_use]
    pub fn with_test_cases(mut self, test_cases: usize) -> Self {
        self.test_cases = test_cases;
        self
    }

    /// Overrides the per-check timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pins the seed so generated inputs, and therefore counterexamples, are
    /// reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the parameters and constructs a [`Config`].
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroTestCases`] when no trials were requested
    /// and [`ConfigError::ZeroTimeout`] when the timeout is zero.
    pub fn build(self) -> Result<Config, ConfigError> {
        let test_cases = NonZeroUsize::new(self.test_cases).ok_or(ConfigError::ZeroTestCases)?;
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Config {
            test_cases,
            timeout: self.timeout,
            seed: self.seed,
        })
    }
}

fn read_env_or_default<T, F>(key: &'static str, default: T, parser: F) -> T
where
    T: Copy,
    F: Fn(&str) -> Result<T, String>,
{
    match env::var(key) {
        Ok(raw) => match parser(&raw) {
            Ok(value) => value,
            Err(reason) => {
                warn!(
                    env = key,
                    raw = %raw,
                    reason = %reason,
                    "invalid lawtest configuration override; using default",
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_cases(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .trim()
        .parse::<usize>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let millis = raw
        .trim()
        .parse::<u64>()
        .map_err(|error| format!("parse error: {error}"))?;
    if millis == 0 {
        return Err("timeout must be > 0 ms".to_owned());
    }
    Ok(Duration::from_millis(millis))
}

fn parse_seed(raw: &str) -> Result<Option<u64>, String> {
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|error| format!("parse error: {error}"))
}
