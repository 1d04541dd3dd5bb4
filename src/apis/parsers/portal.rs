use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::apis::base::SourceParser;
use crate::apis::profile::{PortalLayout, SectorKeywords, SourceProfile};
use crate::constants::DEFAULT_SECTOR;
use crate::domain::RawRecord;
use crate::error::{Result, ScraperError};

// Euro amounts such as "1 200 000 €" or "45000€"
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,3}(?:\s?\d{3})*(?:\s?\d{3})?)\s?€").expect("valid amount regex")
});

/// Generic HTML portal parser driven by the profile's [`PortalLayout`]
pub struct PortalParser;

impl PortalParser {
    pub fn new() -> Self {
        Self
    }

    fn extract_project(
        &self,
        element: ElementRef<'_>,
        title_selector: &Selector,
        profile: &SourceProfile,
        layout: &PortalLayout,
    ) -> Option<RawRecord> {
        let title = element
            .select(title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_else(|| profile.default_title.to_string());

        let text = element.text().collect::<Vec<_>>().join(" ");

        let montant = match (extract_amount(&text), layout.default_amount) {
            (Some(amount), _) => amount,
            (None, Some(default)) => default,
            (None, None) => {
                debug!("Skipping container without amount: {}", title);
                return None;
            }
        };

        let record = json!({
            "id": display_id(layout.id_prefix, &title),
            "titre": title,
            "programme": deduce_programme(&text, layout.thematic_programme_keywords),
            "secteur": deduce_secteur(&text, profile.sector_keywords),
            "montant_total": montant,
            "montant_paye": montant * layout.paid_ratio,
            "statut": "En cours",
            "taux_realisation": layout.taux_realisation,
            "beneficiaire": layout.beneficiaire,
            "date_debut": layout.date_debut,
            "date_fin_prevue": layout.date_fin_prevue,
            "commune": deduce_commune(&text, profile.communes, profile.default_commune),
            "source": profile.source_label,
        });

        match record {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl Default for PortalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for PortalParser {
    fn parse(&self, payload: &[u8], profile: &SourceProfile) -> Result<Vec<RawRecord>> {
        let layout = profile.layout().ok_or_else(|| ScraperError::Source {
            message: format!("{} is not an HTML portal", profile.source_id),
        })?;

        let body = String::from_utf8_lossy(payload);
        let document = Html::parse_document(&body);

        let container_selector = parse_selector(layout.container_selector)?;
        let title_selector = parse_selector(layout.title_selector)?;
        let class_re = Regex::new(layout.class_pattern).map_err(|e| ScraperError::Source {
            message: format!("Invalid class pattern '{}': {}", layout.class_pattern, e),
        })?;

        let projects: Vec<RawRecord> = document
            .select(&container_selector)
            .filter(|el| el.value().classes().any(|class| class_re.is_match(class)))
            .take(layout.max_items)
            .filter_map(|el| self.extract_project(el, &title_selector, profile, layout))
            .collect();

        debug!(
            "Extracted {} projects from {} bytes of HTML",
            projects.len(),
            payload.len()
        );
        Ok(projects)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::Source {
        message: format!("Invalid selector '{}': {:?}", selector, e),
    })
}

/// First euro amount mentioned in `text`, thousands separators removed
pub fn extract_amount(text: &str) -> Option<f64> {
    let captures = AMOUNT_RE.captures(text)?;
    let digits: String = captures[1].chars().filter(|c| !c.is_whitespace()).collect();
    digits.parse().ok()
}

pub fn deduce_programme(text: &str, thematic_keywords: bool) -> &'static str {
    let lower = text.to_lowercase();
    let mentions = |code: &str, theme: &str| {
        lower.contains(code) || (thematic_keywords && lower.contains(theme))
    };

    if mentions("feder", "développement régional") {
        "FEDER"
    } else if mentions("fse", "social") {
        "FSE"
    } else if mentions("feader", "agricole") {
        "FEADER"
    } else if mentions("interreg", "coopération") {
        "INTERREG"
    } else {
        "FEDER"
    }
}

pub fn deduce_secteur(text: &str, sectors: SectorKeywords) -> &'static str {
    let lower = text.to_lowercase();
    sectors
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(sector, _)| *sector)
        .unwrap_or(DEFAULT_SECTOR)
}

/// Communes are matched case-insensitively, hyphens and spaces being equivalent.
pub fn deduce_commune(
    text: &str,
    communes: &'static [&'static str],
    default_commune: &'static str,
) -> &'static str {
    let lower = text.to_lowercase().replace('-', " ");
    communes
        .iter()
        .find(|commune| lower.contains(&commune.to_lowercase().replace('-', " ")))
        .copied()
        .unwrap_or(default_commune)
}

/// `PREFIX_nnnn` from a stable hash of the title; collisions are expected.
pub fn display_id(prefix: &str, title: &str) -> String {
    let digest = Sha256::digest(title.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    format!("{}_{:04}", prefix, u64::from_be_bytes(head) % 10_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::territories::{EUROPE_DIRECT_MARTINIQUE, REGION_REUNION};

    #[test]
    fn test_extract_amount() {
        assert_eq!(extract_amount("Budget : 1 200 000 € engagés"), Some(1_200_000.0));
        assert_eq!(extract_amount("45000€"), Some(45_000.0));
        assert_eq!(extract_amount("coût 3\u{a0}500\u{a0}000 €"), Some(3_500_000.0));
        assert_eq!(extract_amount("aucun montant"), None);
    }

    #[test]
    fn test_deduce_programme() {
        assert_eq!(deduce_programme("Financé par le FEADER", false), "FEADER");
        assert_eq!(deduce_programme("Projet INTERREG Caraïbes", false), "INTERREG");
        assert_eq!(deduce_programme("Fonds FSE+", false), "FSE");
        assert_eq!(deduce_programme("coopération régionale", false), "FEDER");
        assert_eq!(deduce_programme("coopération régionale", true), "INTERREG");
        assert_eq!(deduce_programme("inclusion sociale", true), "FSE");
    }

    #[test]
    fn test_deduce_secteur_follows_table_order() {
        let sectors = REGION_REUNION.sector_keywords;
        assert_eq!(deduce_secteur("filière canne et tourisme", sectors), "Agriculture");
        assert_eq!(deduce_secteur("Mobilité durable", sectors), "Environnement");
        assert_eq!(deduce_secteur("Rien de spécial", sectors), DEFAULT_SECTOR);
    }

    #[test]
    fn test_deduce_commune() {
        let communes = REGION_REUNION.communes;
        assert_eq!(
            deduce_commune("Travaux à saint denis centre", communes, "La Réunion"),
            "Saint-Denis"
        );
        assert_eq!(deduce_commune("Le Tampon", communes, "La Réunion"), "Le Tampon");
        assert_eq!(deduce_commune("Ailleurs", communes, "La Réunion"), "La Réunion");
    }

    #[test]
    fn test_display_id_is_stable() {
        let a = display_id("REG", "Parc éolien");
        assert_eq!(a, display_id("REG", "Parc éolien"));
        assert!(a.starts_with("REG_"));
        assert_eq!(a.len(), "REG_".len() + 4);
    }

    #[test]
    fn test_europe_direct_requires_amount() {
        let html = r#"
            <div class="project-card"><h3>Sans montant</h3><p>FEDER</p></div>
            <div class="fond-item"><h3>Réseau solaire</h3><p>FEDER énergie 2 400 000 €</p></div>
            <div class="sidebar"><h3>Ignoré</h3><p>5 000 000 €</p></div>
        "#;
        let records = PortalParser::new()
            .parse(html.as_bytes(), &EUROPE_DIRECT_MARTINIQUE)
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record["titre"], "Réseau solaire");
        assert_eq!(record["montant_total"], 2_400_000.0);
        assert_eq!(record["secteur"], "Environnement");
        assert_eq!(record["commune"], "Martinique");
        assert_eq!(record["taux_realisation"], 70.0);
        assert_eq!(record["source"], "Europe Direct Martinique");
    }

    #[test]
    fn test_regional_layout_defaults_amount() {
        let html = r#"
            <article class="actualite">
                <h2>Nouvelle médiathèque</h2>
                <p>Inauguration à Saint-Paul</p>
            </article>
        "#;
        let records = PortalParser::new()
            .parse(html.as_bytes(), &REGION_REUNION)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["montant_total"], 500_000.0);
        assert_eq!(records[0]["montant_paye"], 300_000.0);
        assert_eq!(records[0]["commune"], "Saint-Paul");
        assert!(records[0]["id"].as_str().unwrap().starts_with("REG_"));
    }

    #[test]
    fn test_regional_layout_caps_container_count() {
        let html: String = (0..30)
            .map(|i| format!(r#"<div class="news"><h3>Projet {i}</h3></div>"#))
            .collect();
        let records = PortalParser::new()
            .parse(html.as_bytes(), &REGION_REUNION)
            .unwrap();
        assert_eq!(records.len(), 15);
    }
}
