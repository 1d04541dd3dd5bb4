use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::constants::*;
use crate::error::ScraperError;

/// Loosely-typed project record as produced by an extractor
pub type RawRecord = Map<String, Value>;

/// Column order of the normalized table and of the CSV export
pub const FIELD_NAMES: [&str; 13] = [
    "id",
    "titre",
    "programme",
    "secteur",
    "montant_total",
    "montant_paye",
    "statut",
    "taux_realisation",
    "beneficiaire",
    "date_debut",
    "date_fin_prevue",
    "commune",
    "source",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Programme {
    #[default]
    #[serde(rename = "FEDER")]
    Feder,
    #[serde(rename = "FSE")]
    Fse,
    #[serde(rename = "FEADER")]
    Feader,
    #[serde(rename = "INTERREG")]
    Interreg,
}

impl Programme {
    pub const ALL: [Programme; 4] = [
        Programme::Feder,
        Programme::Fse,
        Programme::Feader,
        Programme::Interreg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Programme::Feder => "FEDER",
            Programme::Fse => "FSE",
            Programme::Feader => "FEADER",
            Programme::Interreg => "INTERREG",
        }
    }
}

impl fmt::Display for Programme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statut {
    #[serde(rename = "Terminé")]
    Termine,
    #[default]
    #[serde(rename = "En cours")]
    EnCours,
    #[serde(rename = "En finalisation")]
    EnFinalisation,
}

impl Statut {
    pub const ALL: [Statut; 3] = [Statut::Termine, Statut::EnCours, Statut::EnFinalisation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Statut::Termine => "Terminé",
            Statut::EnCours => "En cours",
            Statut::EnFinalisation => "En finalisation",
        }
    }
}

impl fmt::Display for Statut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schema-conformant project record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    pub id: String,
    pub titre: String,
    pub programme: Programme,
    pub secteur: String,
    pub montant_total: f64,
    pub montant_paye: f64,
    pub statut: Statut,
    pub taux_realisation: f64,
    pub beneficiaire: String,
    pub date_debut: String,
    pub date_fin_prevue: String,
    pub commune: String,
    pub source: String,
}

impl FundRecord {
    /// Converts back into the raw shape so the pipeline can be re-applied.
    pub fn to_raw(&self) -> RawRecord {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => RawRecord::new(),
        }
    }

    /// Field values in `FIELD_NAMES` order, numbers in plain decimal form
    pub fn to_row(&self) -> [String; 13] {
        [
            self.id.clone(),
            self.titre.clone(),
            self.programme.to_string(),
            self.secteur.clone(),
            self.montant_total.to_string(),
            self.montant_paye.to_string(),
            self.statut.to_string(),
            self.taux_realisation.to_string(),
            self.beneficiaire.clone(),
            self.date_debut.clone(),
            self.date_fin_prevue.clone(),
            self.commune.clone(),
            self.source.clone(),
        ]
    }
}

/// Ordered output of the normalization pipeline
pub type NormalizedTable = Vec<FundRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Territory {
    Reunion,
    Martinique,
    Mayotte,
    NouvelleCaledonie,
    Polynesie,
    SaintBarthelemy,
    SaintMartin,
    SaintPierreEtMiquelon,
    WallisEtFutuna,
}

impl Territory {
    pub const ALL: [Territory; 9] = [
        Territory::Reunion,
        Territory::Martinique,
        Territory::Mayotte,
        Territory::NouvelleCaledonie,
        Territory::Polynesie,
        Territory::SaintBarthelemy,
        Territory::SaintMartin,
        Territory::SaintPierreEtMiquelon,
        Territory::WallisEtFutuna,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Territory::Reunion => REUNION,
            Territory::Martinique => MARTINIQUE,
            Territory::Mayotte => MAYOTTE,
            Territory::NouvelleCaledonie => NOUVELLE_CALEDONIE,
            Territory::Polynesie => POLYNESIE,
            Territory::SaintBarthelemy => SAINT_BARTHELEMY,
            Territory::SaintMartin => SAINT_MARTIN,
            Territory::SaintPierreEtMiquelon => SAINT_PIERRE_MIQUELON,
            Territory::WallisEtFutuna => WALLIS_FUTUNA,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Territory::Reunion => "La Réunion",
            Territory::Martinique => "Martinique",
            Territory::Mayotte => "Mayotte",
            Territory::NouvelleCaledonie => "Nouvelle-Calédonie",
            Territory::Polynesie => "Polynésie française",
            Territory::SaintBarthelemy => "Saint-Barthélemy",
            Territory::SaintMartin => "Saint-Martin",
            Territory::SaintPierreEtMiquelon => "Saint-Pierre-et-Miquelon",
            Territory::WallisEtFutuna => "Wallis-et-Futuna",
        }
    }

    /// Short code used in synthetic identifiers and export file names
    pub fn code(&self) -> &'static str {
        match self {
            Territory::Reunion => "RUN",
            Territory::Martinique => "MTQ",
            Territory::Mayotte => "YT",
            Territory::NouvelleCaledonie => "NC",
            Territory::Polynesie => "PF",
            Territory::SaintBarthelemy => "STB",
            Territory::SaintMartin => "SMF",
            Territory::SaintPierreEtMiquelon => "SPM",
            Territory::WallisEtFutuna => "WLF",
        }
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Territory {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Territory::ALL
            .into_iter()
            .find(|t| t.slug() == wanted || t.code().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ScraperError::UnknownTerritory(s.to_string()))
    }
}
