use std::sync::Arc;

use tracing::Level;
use wirebox::{
    demo::wiring::{feature_container, feature_report, sample_features, sample_filters},
    features::ContextAccessor,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).with_target(false).init();

    // The accessor is shared with the container, we update it before each query
    let accessor = Arc::new(ContextAccessor::new());
    let container = feature_container(sample_features(), sample_filters(), accessor).unwrap();

    for line in feature_report(&container, &["Jeff", "Sam"], "Beta").await.unwrap() {
        tracing::info!("{line}");
    }
}
