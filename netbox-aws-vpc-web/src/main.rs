use actix_web::middleware::NormalizePath;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use netbox_aws_vpc_web::config::WebConfig;
use netbox_aws_vpc_web::graphql::build_schema;
use netbox_aws_vpc_web::middleware::RequestLogger;
use netbox_aws_vpc_web::{build_state, configure, logging};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config_path = WebConfig::resolve_path(std::env::args().nth(1));
    let config = WebConfig::load(&config_path)?;

    let _guard = logging::init(&config.log)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "Starting netbox-aws-vpc-web"
    );

    let state = build_state(&config.database).await?;
    let schema = web::Data::new(build_schema(state.clone()));

    let (host, port) = config.server.bind_address();
    let workers = config.server.worker_count();
    tracing::info!(%host, port, workers, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(RequestLogger)
            .app_data(state.clone())
            .app_data(schema.clone())
            .configure(configure)
    })
    .workers(workers)
    .bind((host.as_str(), port))
    .with_context(|| format!("failed to bind {host}:{port}"))?
    .run()
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
