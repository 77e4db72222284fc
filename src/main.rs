use dotenvy::dotenv;
use tracing::info;

use hireme_auth::infra::{app::create_app, setup::init_app_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let app_state = init_app_state();

    // Read bind address from config before moving app_state
    let bind_addr = app_state.config.bind_addr;

    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Auth service listening at {}", &listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
