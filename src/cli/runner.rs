//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientSettings;
use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::pagination::ListingPager;
use crate::stats::HourHistogram;
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;
use serde_json::json;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let pager = self.build_pager()?;

        match &self.cli.command {
            Commands::Get { path, raw, query } => {
                self.get(pager.client(), path, *raw, query).await
            }
            Commands::Listing { path, max, query } => {
                self.listing(&pager, path, *max, query).await
            }
            Commands::ById { id } => self.by_id(&pager, id).await,
            Commands::Hours { path, max } => self.hours(&pager, path, *max).await,
        }
    }

    /// Settings file, environment, then command-line overrides
    fn load_settings(&self) -> Result<ClientSettings> {
        let mut settings = ClientSettings::load(self.cli.config.as_deref())?;
        if let Some(base_url) = &self.cli.base_url {
            settings.base_url.clone_from(base_url);
        }
        if let Some(user_agent) = &self.cli.user_agent {
            settings.user_agent.clone_from(user_agent);
        }
        Ok(settings)
    }

    fn build_pager(&self) -> Result<ListingPager> {
        let settings = self.load_settings()?;
        let page_limit = settings.page_limit;
        let client = HttpClient::with_config(settings.into_client_config()?)?;
        Ok(ListingPager::new(client).with_page_limit(page_limit))
    }

    /// Fetch a single path
    async fn get(
        &self,
        client: &HttpClient,
        path: &str,
        raw: bool,
        query: &[(String, String)],
    ) -> Result<()> {
        let options = query_options(query);
        if raw {
            let value = client.request(path, &options).await?;
            self.output(&value)?;
        } else {
            let value = client.request_normalized(path, &options).await?;
            self.output(&value)?;
        }
        Ok(())
    }

    /// Stream listing items
    async fn listing(
        &self,
        pager: &ListingPager,
        path: &str,
        max: Option<usize>,
        query: &[(String, String)],
    ) -> Result<()> {
        let stream = pager.paginate(path, query_options(query));
        let mut stream = stream.take(max.unwrap_or(usize::MAX));

        let mut count = 0usize;
        while let Some(item) = stream.try_next().await? {
            self.output(&item)?;
            count += 1;
        }

        info!("Fetched {} items from {}", count, path);
        Ok(())
    }

    /// Fetch things by fullname
    async fn by_id(&self, pager: &ListingPager, id: &str) -> Result<()> {
        let value = pager.fetch_by_id(id, &RequestOptions::new()).await?;
        self.output(&value)?;
        Ok(())
    }

    /// Hour-of-day histogram of a listing
    async fn hours(&self, pager: &ListingPager, path: &str, max: usize) -> Result<()> {
        let mut histogram = HourHistogram::new();
        let mut stream = pager.paginate(path, RequestOptions::new()).take(max);

        while let Some(item) = stream.try_next().await? {
            histogram.record(&item);
        }

        info!(
            "Counted {} items from {} ({} skipped)",
            histogram.total(),
            path,
            histogram.skipped
        );

        self.output(&json!({
            "path": path,
            "total": histogram.total(),
            "skipped": histogram.skipped,
            "peak_hour": histogram.peak_hour(),
            "counts": histogram.counts,
        }))?;
        Ok(())
    }

    /// Output a value
    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", render(self.cli.format, value)?);
        Ok(())
    }
}

fn render<T: Serialize>(format: OutputFormat, value: &T) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    Ok(rendered)
}

fn query_options(query: &[(String, String)]) -> RequestOptions {
    query
        .iter()
        .fold(RequestOptions::new(), |options, (key, value)| {
            options.query(key, value)
        })
}
