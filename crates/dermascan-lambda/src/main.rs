use tracing_subscriber::EnvFilter;

use dermascan_lambda::config::LambdaConfig;
use dermascan_lambda::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = LambdaConfig::from_env();
    tracing::info!(
        bucket = %config.bucket,
        region = %config.region,
        session_ttl_secs = config.session_ttl.as_secs(),
        "starting"
    );

    let s3 = dermascan_storage::client::build_client_with_region(&config.region).await;
    let app = dermascan_lambda::app(AppState::with_session_ttl(s3, config.bucket, config.session_ttl));

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
