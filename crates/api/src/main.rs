use anyhow::Context;
use todolist_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todolist_observability::init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let app = todolist_api::app::build_app_from_config(&config)
        .await
        .context("failed to initialise item store")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
