use tambola_server::{DEFAULT_PORT, OpenGate, ServerError, TambolaServerBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    let server = TambolaServerBuilder::new()
        .bind(&format!("0.0.0.0:{port}"))
        .build(OpenGate)
        .await?;

    server.run().await
}
