use eyre::Context;
use number_merger::{
    config::Config,
    logging::init_logger,
    merger::{valid_urls, Aggregator, Fetcher, Numbers},
};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    let config = envy::from_env::<Config>().wrap_err("cannot get config from env")?;

    init_logger(config.log_json);

    let urls = valid_urls(config.urls.clone());
    if urls.is_empty() {
        eyre::bail!("URLS must contain at least one valid url");
    }

    let aggregator = Aggregator::new(Fetcher::new(config.fetch_timeout()));
    let numbers = aggregator.aggregate(urls).await;

    println!("{}", serde_json::to_string(&Numbers { numbers })?);

    Ok(())
}
