use serde::Serialize;
use std::collections::HashSet;

use crate::constants::ROW_COUNT_MENU;
use crate::domain::{FundRecord, Programme, Statut};

/// Set-membership selection over programme, secteur and statut.
///
/// `None` keeps every value of a dimension; `Some(empty)` keeps nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundFilter {
    pub programmes: Option<HashSet<Programme>>,
    pub secteurs: Option<HashSet<String>>,
    pub statuts: Option<HashSet<Statut>>,
}

/// Query-string form of a filter.
///
/// Each dimension may repeat its key (`secteur=a&secteur=b`); programme and
/// statut values may also be comma-joined. An absent key means all values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    pub programme: Option<Vec<String>>,
    pub secteur: Option<Vec<String>>,
    pub statut: Option<Vec<String>>,
    pub limit: Option<usize>,
}

impl FilterParams {
    /// Collect decoded query pairs; unknown keys are ignored and an unreadable
    /// limit is treated as absent.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "programme" => &mut params.programme,
                "secteur" => &mut params.secteur,
                "statut" => &mut params.statut,
                "limit" => {
                    params.limit = value.into().trim().parse().ok();
                    continue;
                }
                _ => continue,
            };
            slot.get_or_insert_with(Vec::new).push(value.into());
        }
        params
    }

    /// Encoded query string carrying the filter dimensions only
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        for (key, values) in [
            ("programme", &self.programme),
            ("secteur", &self.secteur),
            ("statut", &self.statut),
        ] {
            let Some(values) = values else { continue };
            if values.is_empty() {
                parts.push(format!("{}=", key));
            }
            parts.extend(
                values
                    .iter()
                    .map(|v| format!("{}={}", key, encode_query_value(v))),
            );
        }
        parts.join("&")
    }
}

fn encode_query_value(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

impl FundFilter {
    pub fn matches(&self, record: &FundRecord) -> bool {
        self.programmes
            .as_ref()
            .map_or(true, |set| set.contains(&record.programme))
            && self
                .secteurs
                .as_ref()
                .map_or(true, |set| set.contains(&record.secteur))
            && self
                .statuts
                .as_ref()
                .map_or(true, |set| set.contains(&record.statut))
    }

    /// Matching records, table order preserved
    pub fn apply<'a>(&self, table: &'a [FundRecord]) -> Vec<&'a FundRecord> {
        table.iter().filter(|r| self.matches(r)).collect()
    }

    /// Unknown programme or statut labels select nothing rather than erroring.
    /// Secteurs are free text and are taken whole, commas included.
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            programmes: params.programme.as_deref().map(|values| {
                split_lists(values)
                    .filter_map(|v| Programme::ALL.into_iter().find(|p| p.as_str() == v))
                    .collect()
            }),
            secteurs: params.secteur.as_deref().map(|values| {
                values
                    .iter()
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect()
            }),
            statuts: params.statut.as_deref().map(|values| {
                split_lists(values)
                    .filter_map(|v| Statut::ALL.into_iter().find(|s| s.as_str() == v))
                    .collect()
            }),
        }
    }
}

fn split_lists(values: &[String]) -> impl Iterator<Item = &str> {
    values
        .iter()
        .flat_map(|list| list.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Distinct values per dimension, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub programmes: Vec<Programme>,
    pub secteurs: Vec<String>,
    pub statuts: Vec<Statut>,
}

impl FilterOptions {
    pub fn from_table(table: &[FundRecord]) -> Self {
        let mut options = Self::default();
        for record in table {
            if !options.programmes.contains(&record.programme) {
                options.programmes.push(record.programme);
            }
            if !options.secteurs.contains(&record.secteur) {
                options.secteurs.push(record.secteur.clone());
            }
            if !options.statuts.contains(&record.statut) {
                options.statuts.push(record.statut);
            }
        }
        options
    }
}

/// Rows shown per page; anything off the menu snaps to the first entry.
pub fn row_limit(requested: Option<usize>) -> usize {
    requested
        .filter(|n| ROW_COUNT_MENU.contains(n))
        .unwrap_or(ROW_COUNT_MENU[0])
}
