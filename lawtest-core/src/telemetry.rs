//! Metric recording for checks, compiled to no-ops without the `metrics`
//! feature.

use std::time::Duration;

use crate::law::Law;

#[cfg(feature = "metrics")]
pub(crate) fn record_check(law: Law, trials: usize, elapsed: Duration) {
    metrics::counter!("lawtest_trials_total", "law" => law.name()).increment(trials as u64);
    metrics::histogram!("lawtest_check_duration_seconds", "law" => law.name())
        .record(elapsed.as_secs_f64());
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_check(_law: Law, _trials: usize, _elapsed: Duration) {}

#[cfg(feature = "metrics")]
pub(crate) fn record_violations(law: Law, count: usize) {
    metrics::counter!("lawtest_violations_total", "law" => law.name()).increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_violations(_law: Law, _count: usize) {}

#[cfg(feature = "metrics")]
pub(crate) fn record_worker_faults(law: Law, count: usize) {
    metrics::counter!("lawtest_worker_faults_total", "law" => law.name())
        .increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_worker_faults(_law: Law, _count: usize) {}
