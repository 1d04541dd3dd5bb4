//! Configuration objects that drive one extractor instance each.

use serde_json::json;

use crate::domain::{RawRecord, Territory};

/// An ordered keyword table: first sector with a matching keyword wins
pub type SectorKeywords = &'static [(&'static str, &'static [&'static str])];

/// How a portal lays out its project listings and what the scraped records look like
#[derive(Debug)]
pub struct PortalLayout {
    /// Candidate container tags, as a CSS selector
    pub container_selector: &'static str,
    /// Regex searched against each class of a candidate container
    pub class_pattern: &'static str,
    pub max_items: usize,
    pub title_selector: &'static str,
    /// Amount used when a container mentions none; `None` skips the container
    pub default_amount: Option<f64>,
    pub id_prefix: &'static str,
    pub paid_ratio: f64,
    pub taux_realisation: f64,
    pub beneficiaire: &'static str,
    pub date_debut: &'static str,
    pub date_fin_prevue: &'static str,
    /// Also deduce programmes from thematic words ("social", "agricole", ...)
    pub thematic_programme_keywords: bool,
}

/// Europe Direct information centres: `div` blocks, amount required
pub const EUROPE_DIRECT_LAYOUT: PortalLayout = PortalLayout {
    container_selector: "div",
    class_pattern: "project|fond|programme",
    max_items: 20,
    title_selector: "h2, h3, h4, strong",
    default_amount: None,
    id_prefix: "ED",
    paid_ratio: 0.7,
    taux_realisation: 70.0,
    beneficiaire: "Bénéficiaire non spécifié",
    date_debut: "2022-01-01",
    date_fin_prevue: "2024-12-31",
    thematic_programme_keywords: true,
};

/// Regional and collectivity portals: news articles, amount defaulted
pub const REGIONAL_LAYOUT: PortalLayout = PortalLayout {
    container_selector: "article, div",
    class_pattern: "actualite|project|news",
    max_items: 15,
    title_selector: "h2, h3, h4, a",
    default_amount: Some(500_000.0),
    id_prefix: "REG",
    paid_ratio: 0.6,
    taux_realisation: 60.0,
    beneficiaire: "Porteur de projet local",
    date_debut: "2023-01-01",
    date_fin_prevue: "2025-06-30",
    thematic_programme_keywords: false,
};

#[derive(Debug)]
pub enum SourceKind {
    /// HTML portal scraped with a [`PortalLayout`]
    Portal(&'static PortalLayout),
    /// data.gouv.fr dataset search
    DataGouv { query: &'static str },
}

#[derive(Debug)]
pub struct SourceProfile {
    pub source_id: &'static str,
    pub territory: Territory,
    pub url: &'static str,
    pub source_label: &'static str,
    pub kind: SourceKind,
    pub default_title: &'static str,
    pub sector_keywords: SectorKeywords,
    /// Communes looked up in the page text; empty means always `default_commune`
    pub communes: &'static [&'static str],
    pub default_commune: &'static str,
    pub fallback: FallbackSet,
}

impl SourceProfile {
    pub fn layout(&self) -> Option<&'static PortalLayout> {
        match self.kind {
            SourceKind::Portal(layout) => Some(layout),
            SourceKind::DataGouv { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct FallbackProject {
    pub titre: &'static str,
    pub programme: &'static str,
    pub secteur: &'static str,
    pub montant: f64,
    /// Falls back to the set's `commune` when absent
    pub commune: Option<&'static str>,
}

/// Hand-authored reference projects returned when live extraction fails
#[derive(Debug)]
pub struct FallbackSet {
    pub id_prefix: &'static str,
    pub paid_ratio: f64,
    pub taux_realisation: f64,
    pub beneficiaire: &'static str,
    pub date_debut: &'static str,
    pub date_fin_prevue: &'static str,
    pub commune: &'static str,
    pub source_label: &'static str,
    pub projects: &'static [FallbackProject],
}

impl FallbackSet {
    pub fn to_records(&self) -> Vec<RawRecord> {
        self.projects
            .iter()
            .enumerate()
            .filter_map(|(i, project)| {
                let record = json!({
                    "id": format!("{}_{:03}", self.id_prefix, i),
                    "titre": project.titre,
                    "programme": project.programme,
                    "secteur": project.secteur,
                    "montant_total": project.montant,
                    "montant_paye": project.montant * self.paid_ratio,
                    "statut": "En cours",
                    "taux_realisation": self.taux_realisation,
                    "beneficiaire": self.beneficiaire,
                    "date_debut": self.date_debut,
                    "date_fin_prevue": self.date_fin_prevue,
                    "commune": project.commune.unwrap_or(self.commune),
                    "source": self.source_label,
                });
                match record {
                    serde_json::Value::Object(map) => Some(map),
                    _ => None,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECTS: &[FallbackProject] = &[
        FallbackProject {
            titre: "Extension du port",
            programme: "FEDER",
            secteur: "Transport",
            montant: 4_800_000.0,
            commune: Some("Saint-Pierre"),
        },
        FallbackProject {
            titre: "Très haut débit",
            programme: "FEDER",
            secteur: "Numérique",
            montant: 2_900_000.0,
            commune: None,
        },
    ];

    #[test]
    fn test_fallback_records_follow_set_parameters() {
        let set = FallbackSet {
            id_prefix: "REG_SPM",
            paid_ratio: 0.55,
            taux_realisation: 55.0,
            beneficiaire: "Collectivité et entreprises",
            date_debut: "2023-02-01",
            date_fin_prevue: "2025-08-31",
            commune: "Multiple",
            source_label: "Collectivité SPM (données de référence)",
            projects: PROJECTS,
        };

        let records = set.to_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "REG_SPM_000");
        assert_eq!(records[1]["id"], "REG_SPM_001");
        assert_eq!(records[0]["montant_paye"], 4_800_000.0 * 0.55);
        assert_eq!(records[0]["commune"], "Saint-Pierre");
        assert_eq!(records[1]["commune"], "Multiple");
        assert_eq!(records[1]["statut"], "En cours");
    }
}
