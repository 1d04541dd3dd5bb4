use reqwest::Client;
use tracing::{info, instrument, warn};

use crate::apis::profile::SourceProfile;
use crate::domain::RawRecord;
use crate::error::Result;
use crate::infra::http_client::fetch_bytes;

/// Core trait that every funds data source implements.
///
/// `fetch` never fails: transport, status and parse problems all end in the
/// source's static fallback dataset so callers always get usable records.
#[async_trait::async_trait]
pub trait FundsSource: Send + Sync {
    /// Unique identifier for this source
    fn source_id(&self) -> &'static str;

    /// Human-readable label shown in logs and on the dashboard
    fn source_name(&self) -> &'static str;

    /// Fetch all project records, substituting the fallback on failure
    async fn fetch(&self) -> Vec<RawRecord>;

    /// Hand-authored substitute dataset
    fn fallback(&self) -> Vec<RawRecord>;
}

/// Source-specific extraction strategy applied to a downloaded page
pub trait SourceParser: Send + Sync {
    fn parse(&self, payload: &[u8], profile: &SourceProfile) -> Result<Vec<RawRecord>>;
}

/// Base scraper that implements FundsSource for one profile and parser
pub struct BaseScraper {
    client: Client,
    profile: &'static SourceProfile,
    parser: Box<dyn SourceParser>,
}

impl BaseScraper {
    pub fn new(
        client: Client,
        profile: &'static SourceProfile,
        parser: Box<dyn SourceParser>,
    ) -> Self {
        Self {
            client,
            profile,
            parser,
        }
    }

    pub fn profile(&self) -> &SourceProfile {
        self.profile
    }

    async fn try_fetch(&self) -> Result<Vec<RawRecord>> {
        let payload = fetch_bytes(&self.client, self.profile.url).await?;
        self.parser.parse(&payload, self.profile)
    }
}

#[async_trait::async_trait]
impl FundsSource for BaseScraper {
    fn source_id(&self) -> &'static str {
        self.profile.source_id
    }

    fn source_name(&self) -> &'static str {
        self.profile.source_label
    }

    #[instrument(skip(self), fields(source = self.profile.source_id))]
    async fn fetch(&self) -> Vec<RawRecord> {
        match self.try_fetch().await {
            Ok(records) if !records.is_empty() => {
                info!(
                    "Successfully fetched {} projects from {}",
                    records.len(),
                    self.profile.source_label
                );
                records
            }
            Ok(_) => {
                warn!("No projects found, using reference data");
                metrics::counter!("fonds_source_fallback_total").increment(1);
                self.fallback()
            }
            Err(e) => {
                warn!("Scraping failed ({}), using reference data", e);
                metrics::counter!("fonds_source_fallback_total").increment(1);
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> Vec<RawRecord> {
        self.profile.fallback.to_records()
    }
}
