//! Environment-driven tuning for `proptest` suites.
//!
//! Every property suite in the workspace reads the same knobs, so CI can
//! scale all of them with one variable.

use std::env;

/// Overrides the number of cases per property.
pub const PBT_CASES_ENV_KEY: &str = "LAWTEST_PBT_CASES";
/// Runs each case in a forked subprocess when truthy.
pub const PBT_FORK_ENV_KEY: &str = "LAWTEST_PBT_FORK";

/// Case count and isolation mode for a property suite.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile, falling back to the given defaults for unset or
    /// invalid variables. Invalid values are logged at `WARN`.
    ///
    /// # Examples
    /// ```
    /// use lawtest_test_support::profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: read_env_or_default(PBT_CASES_ENV_KEY, default_cases, parse_cases),
            fork: read_env_or_default(PBT_FORK_ENV_KEY, default_fork, parse_bool),
        }
    }

    /// Cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn read_env_or_default<T, F>(key: &'static str, default: T, parser: F) -> T
where
    T: Copy,
    F: Fn(&str) -> Result<T, String>,
{
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parser(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "invalid property-suite override; using default",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets or clears a variable for the guard's lifetime.
    struct ScopedVar {
        key: &'static str,
        original: Option<String>,
    }

    impl ScopedVar {
        fn new(key: &'static str, value: Option<&str>) -> Self {
            let original = env::var(key).ok();
            apply(key, value);
            Self { key, original }
        }
    }

    impl Drop for ScopedVar {
        fn drop(&mut self) {
            apply(self.key, self.original.as_deref());
        }
    }

    fn apply(key: &str, value: Option<&str>) {
        match value {
            // SAFETY: tests serialize access with ENV_LOCK.
            Some(value) => unsafe { env::set_var(key, value) },
            // SAFETY: tests serialize access with ENV_LOCK.
            None => unsafe { env::remove_var(key) },
        }
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _cases = ScopedVar::new(PBT_CASES_ENV_KEY, None);
        let _fork = ScopedVar::new(PBT_FORK_ENV_KEY, None);

        assert_eq!(
            ProptestRunProfile::load(32, true),
            ProptestRunProfile {
                cases: 32,
                fork: true
            }
        );
    }

    #[rstest]
    #[case(Some("500"), 500)]
    #[case(Some(" 7 "), 7)]
    #[case(Some("0"), 64)]
    #[case(Some("lots"), 64)]
    #[case(None, 64)]
    fn case_overrides_are_validated(#[case] raw: Option<&str>, #[case] expected: u32) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _cases = ScopedVar::new(PBT_CASES_ENV_KEY, raw);
        let _fork = ScopedVar::new(PBT_FORK_ENV_KEY, None);

        assert_eq!(ProptestRunProfile::load(64, false).cases(), expected);
    }

    #[rstest]
    #[case("on", false, true)]
    #[case("YES", false, true)]
    #[case("0", true, false)]
    #[case("maybe", true, true)]
    #[case("", false, false)]
    fn fork_overrides_are_validated(
        #[case] raw: &str,
        #[case] default: bool,
        #[case] expected: bool,
    ) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _cases = ScopedVar::new(PBT_CASES_ENV_KEY, None);
        let _fork = ScopedVar::new(PBT_FORK_ENV_KEY, Some(raw));

        assert_eq!(ProptestRunProfile::load(64, default).fork(), expected);
    }
}
