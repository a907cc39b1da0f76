use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Numbers {
    pub numbers: Vec<i64>,
}

pub type FetchOutcome = Result<Vec<i64>>;

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl Fetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let mut request = self.client.get(url);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let res = request.send().await?.error_for_status()?;
        let body = res.json::<Numbers>().await?;

        Ok(body.numbers)
    }
}

pub fn merge<I>(lists: I) -> Vec<i64>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = i64>,
{
    lists
        .into_iter()
        .flatten()
        .collect::<BTreeSet<i64>>()
        .into_iter()
        .collect()
}

pub fn valid_urls<I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    candidates
        .into_iter()
        .filter(|candidate| match Url::parse(candidate) {
            Ok(_) => true,
            Err(err) => {
                debug!(url = %candidate, error = %err, "dropping malformed url");
                false
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    fetcher: Fetcher,
}

impl Aggregator {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Waits for all fetches to settle. Without a fetch timeout a single
    /// upstream that never answers holds up the whole call.
    pub async fn aggregate(&self, urls: Vec<String>) -> Vec<i64> {
        if urls.is_empty() {
            return Vec::new();
        }

        let mut tasks = JoinSet::new();

        for url in urls {
            let fetcher = self.fetcher.clone();

            tasks.spawn(async move {
                let outcome = fetcher.fetch(&url).await;
                (url, outcome)
            });
        }

        merge(collect_successes(tasks).await)
    }
}

async fn collect_successes(mut tasks: JoinSet<(String, FetchOutcome)>) -> Vec<Vec<i64>> {
    let mut lists = Vec::with_capacity(tasks.len());

    while let Some(joined) = tasks.join_next().await {
        match joined.map_err(Error::Join) {
            Ok((_, Ok(numbers))) => lists.push(numbers),
            Ok((url, Err(err))) => warn!(%url, error = %err, "dropping upstream"),
            Err(err) => warn!(error = %err, "dropping upstream"),
        }
    }

    lists
}
