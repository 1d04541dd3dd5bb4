use reqwest::Client;
use tracing::debug;

use crate::apis::base::{BaseScraper, FundsSource};
use crate::apis::data_gouv::DataGouvSource;
use crate::apis::parsers::PortalParser;
use crate::apis::profile::{SourceKind, SourceProfile};
use crate::apis::territories::profiles_for;
use crate::config::HttpConfig;
use crate::domain::Territory;
use crate::error::Result;
use crate::infra::http_client::build_client;

/// Build the extractor matching a profile's kind
pub fn create_source(profile: &'static SourceProfile, client: Client) -> Box<dyn FundsSource> {
    match profile.kind {
        SourceKind::Portal(_) => Box::new(BaseScraper::new(
            client,
            profile,
            Box::new(PortalParser::new()),
        )),
        SourceKind::DataGouv { .. } => Box::new(DataGouvSource::new(client, profile)),
    }
}

/// All extractors of a territory, in fetch order, sharing one HTTP client
pub fn sources_for_territory(
    territory: Territory,
    http: &HttpConfig,
) -> Result<Vec<Box<dyn FundsSource>>> {
    let client = build_client(http)?;
    let sources: Vec<Box<dyn FundsSource>> = profiles_for(territory)
        .iter()
        .map(|profile| create_source(*profile, client.clone()))
        .collect();
    debug!("Built {} sources for {}", sources.len(), territory.slug());
    Ok(sources)
}
