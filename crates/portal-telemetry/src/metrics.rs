//! Prometheus metrics for the portal engine.
//!
//! All metrics follow the naming convention: `hp_<subsystem>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // STATE STORE METRICS (hp-03)
    // =========================================================================

    /// Actions applied by the store
    pub static ref ACTIONS_DISPATCHED: CounterVec = CounterVec::new(
        Opts::new("hp_store_actions_dispatched_total", "Actions applied to the state store"),
        &["action"]
    ).expect("metric creation failed");

    // =========================================================================
    // RECONCILER METRICS (hp-04)
    // =========================================================================

    /// Decisions taken for identity events
    pub static ref RECONCILER_DECISIONS: CounterVec = CounterVec::new(
        Opts::new("hp_reconciler_decisions_total", "Identity reconciliation decisions"),
        &["outcome"]  // outcome: backend/salvaged/skeleton/ignored/logged_out/...
    ).expect("metric creation failed");

    // =========================================================================
    // HYDRATOR METRICS (hp-05)
    // =========================================================================

    /// Startup hydration outcomes
    pub static ref HYDRATION_OUTCOMES: CounterVec = CounterVec::new(
        Opts::new("hp_hydrator_outcomes_total", "Startup hydration outcomes"),
        &["source"]  // source: backend/cache/skeleton/realtime/none
    ).expect("metric creation failed");

    /// Startup hydration duration
    pub static ref HYDRATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "hp_hydrator_duration_seconds",
            "Time spent hydrating the initial state"
        ).buckets(exponential_buckets(0.001, 2.0, 15).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // CACHE METRICS (hp-01)
    // =========================================================================

    /// Corrupt cache slots discarded
    pub static ref CACHE_CORRUPTIONS: CounterVec = CounterVec::new(
        Opts::new("hp_cache_corruptions_total", "Corrupt local cache slots discarded"),
        &["slot"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(ACTIONS_DISPATCHED.clone()),
        Box::new(RECONCILER_DECISIONS.clone()),
        Box::new(HYDRATION_OUTCOMES.clone()),
        Box::new(HYDRATION_DURATION.clone()),
        Box::new(CACHE_CORRUPTIONS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
