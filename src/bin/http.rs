use eyre::Context;
use number_merger::{config::Config, logging::init_logger, server::Server};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    let config = envy::from_env::<Config>().wrap_err("cannot get config from env")?;

    init_logger(config.log_json);

    Server::new(config)
        .serve()
        .await
        .wrap_err("server stopped unexpectedly")
}
