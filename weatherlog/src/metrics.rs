use crate::errors::Result;
use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref PAGE_REQUESTS_TOTAL: IntCounter = IntCounter::with_opts(Opts::new(
        "weatherlog_page_requests_total",
        "Total readings page requests"
    ))
    .unwrap();
    pub static ref PAGE_FAILURES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "weatherlog_page_failures_total",
            "Total failed page requests by failing stage"
        ),
        &["stage"]
    )
    .unwrap();
    pub static ref ROWS_RENDERED_TOTAL: IntCounter = IntCounter::with_opts(Opts::new(
        "weatherlog_rows_rendered_total",
        "Total reading rows served"
    ))
    .unwrap();
    pub static ref PAGE_LATENCY_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "weatherlog_page_latency_seconds",
            "Time taken to load one page of readings"
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])
    )
    .unwrap();
}

pub fn init_metrics() -> Result<()> {
    REGISTRY.register(Box::new(PAGE_REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(PAGE_FAILURES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(ROWS_RENDERED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(PAGE_LATENCY_SECONDS.clone()))?;
    Ok(())
}

pub fn gather_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
