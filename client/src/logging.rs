//! Tracing initialization for embedders and tests

use crate::config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
///
/// Safe to call more than once; only the first call installs the global
/// subscriber. Embedding apps that already configure tracing can skip
/// this entirely.
pub fn init() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "fittrack_client=info".into()
        } else {
            "fittrack_client=debug,fittrack_shared=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .ok();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
            .ok();
    }
}
