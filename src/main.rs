use std::sync::Arc;

use anyhow::Result;

use critterdash::config::Config;
use critterdash::logging::{self, obj, v_str, Domain, Level};
use critterdash::provider::DatasetProvider;
use critterdash::server;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logging::log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("bind", v_str(&config.bind_addr)),
            ("table", v_str(config.db_table_name.as_deref().unwrap_or(""))),
        ]),
    );

    let provider = DatasetProvider::new(config.clone());
    let state = Arc::new(server::AppState::new(provider).await);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    logging::log(Level::Info, Domain::System, "listening", obj(&[("addr", v_str(&config.bind_addr))]));
    axum::serve(listener, server::router(state)).await?;
    Ok(())
}
