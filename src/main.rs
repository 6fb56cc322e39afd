//! spindle server binary.
//!
//! Serves the statically configured routes behind the installed middleware.
//!
//! Run with:
//!   RUST_LOG=info SPINDLE_PORT=3000 cargo run
//!
//! Try:
//!   curl http://localhost:3000/
//!   curl http://localhost:3000/whoami

use spindle::{Server, Settings, shared_application};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), spindle::Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "spindle=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    let server = Server::from_settings(&settings)?;

    tracing::info!(host = %settings.host, port = settings.port, "starting server");

    server.serve(shared_application().clone()).await
}
