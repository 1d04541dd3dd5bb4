//! Normalization of heterogeneous scraped records into the canonical schema.
//!
//! Stages run in a fixed order for every record: programme lookup, numeric
//! coercion, paid-amount capping, status lookup, amount range filter and
//! finally the completion rate clamp. Malformed fields degrade to defaults;
//! the range filter is the only way a record leaves the table.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::constants::{MAX_AMOUNT, MIN_AMOUNT};
use crate::domain::{FundRecord, NormalizedTable, Programme, RawRecord, Statut};

const PROGRAMME_SYNONYMS: [(&str, Programme); 7] = [
    ("FEDER", Programme::Feder),
    ("FSE", Programme::Fse),
    ("FEADER", Programme::Feader),
    ("FSE+", Programme::Fse),
    ("INTERREG", Programme::Interreg),
    ("ERDF", Programme::Feder),
    ("ESF", Programme::Fse),
];

// Keys are matched after lower-casing the raw value
const STATUT_SYNONYMS: [(&str, Statut); 6] = [
    ("terminé", Statut::Termine),
    ("en cours", Statut::EnCours),
    ("finalisation", Statut::EnFinalisation),
    ("en finalisation", Statut::EnFinalisation),
    ("completed", Statut::Termine),
    ("in progress", Statut::EnCours),
];

/// Why a field did not come through as provided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Absent or null, default substituted
    Missing,
    /// Present but not in the synonym table, default substituted
    Unrecognized,
    /// Present but not numeric, coerced to 0
    Unparseable,
    /// `montant_paye` lowered to respect `montant_total` (or raised to 0)
    Capped,
    /// `taux_realisation` clamped into [0, 100]
    Clamped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldWarning {
    /// Position of the record in the pipeline input
    pub record_index: usize,
    pub field: &'static str,
    pub kind: WarningKind,
}

/// Diagnostics gathered alongside the normalized table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizationReport {
    pub input_records: usize,
    pub kept_records: usize,
    pub dropped_out_of_range: usize,
    pub warnings: Vec<FieldWarning>,
}

impl NormalizationReport {
    pub fn warnings_for(&self, field: &str) -> impl Iterator<Item = &FieldWarning> + '_ {
        let field = field.to_string();
        self.warnings.iter().filter(move |w| w.field == field)
    }
}

/// Normalize raw records into a schema-conformant table.
pub fn normalize(raw: &[RawRecord]) -> NormalizedTable {
    normalize_with_report(raw).0
}

/// Same as [`normalize`], also returning what was defaulted or dropped.
#[instrument(skip(raw), fields(records = raw.len()))]
pub fn normalize_with_report(raw: &[RawRecord]) -> (NormalizedTable, NormalizationReport) {
    let mut report = NormalizationReport {
        input_records: raw.len(),
        ..Default::default()
    };

    let mut table = Vec::with_capacity(raw.len());
    for (index, record) in raw.iter().enumerate() {
        match normalize_record(index, record, &mut report.warnings) {
            Some(fund) => table.push(fund),
            None => report.dropped_out_of_range += 1,
        }
    }
    report.kept_records = table.len();

    debug!(
        kept = report.kept_records,
        dropped = report.dropped_out_of_range,
        warnings = report.warnings.len(),
        "Normalization finished"
    );
    metrics::counter!("fonds_normalize_records_total").increment(raw.len() as u64);
    metrics::counter!("fonds_normalize_dropped_total")
        .increment(report.dropped_out_of_range as u64);

    (table, report)
}

fn normalize_record(
    index: usize,
    raw: &RawRecord,
    warnings: &mut Vec<FieldWarning>,
) -> Option<FundRecord> {
    let mut warn = |field: &'static str, kind: WarningKind| {
        warnings.push(FieldWarning {
            record_index: index,
            field,
            kind,
        })
    };

    let (programme, programme_issue) = standardize_programme(raw.get("programme"));
    if let Some(kind) = programme_issue {
        warn("programme", kind);
    }

    let mut amounts = [0.0_f64; 3];
    for (slot, field) in amounts
        .iter_mut()
        .zip(["montant_total", "montant_paye", "taux_realisation"])
    {
        let (value, issue) = coerce_number(raw.get(field));
        if let Some(kind) = issue {
            warn(field, kind);
        }
        *slot = value;
    }
    let [montant_total, montant_paye, taux_realisation] = amounts;

    let capped = cap_paid_amount(montant_paye, montant_total);
    if capped != montant_paye {
        warn("montant_paye", WarningKind::Capped);
    }

    let (statut, statut_issue) = standardize_statut(raw.get("statut"));
    if let Some(kind) = statut_issue {
        warn("statut", kind);
    }

    if !is_amount_in_range(montant_total) {
        return None;
    }

    let clamped = clamp_rate(taux_realisation);
    if clamped != taux_realisation {
        warn("taux_realisation", WarningKind::Clamped);
    }

    Some(FundRecord {
        id: text_field(raw, "id"),
        titre: text_field(raw, "titre"),
        programme,
        secteur: text_field(raw, "secteur"),
        montant_total,
        montant_paye: capped,
        statut,
        taux_realisation: clamped,
        beneficiaire: text_field(raw, "beneficiaire"),
        date_debut: text_field(raw, "date_debut"),
        date_fin_prevue: text_field(raw, "date_fin_prevue"),
        commune: text_field(raw, "commune"),
        source: text_field(raw, "source"),
    })
}

/// Exact synonym lookup; anything else resolves to FEDER.
pub fn standardize_programme(value: Option<&Value>) -> (Programme, Option<WarningKind>) {
    match value {
        None | Some(Value::Null) => (Programme::default(), Some(WarningKind::Missing)),
        Some(Value::String(s)) => PROGRAMME_SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == s.as_str())
            .map(|(_, programme)| (*programme, None))
            .unwrap_or((Programme::default(), Some(WarningKind::Unrecognized))),
        Some(_) => (Programme::default(), Some(WarningKind::Unrecognized)),
    }
}

/// Lenient numeric coercion: failures become 0, never an error.
pub fn coerce_number(value: Option<&Value>) -> (f64, Option<WarningKind>) {
    let parsed = match value {
        None | Some(Value::Null) => return (0.0, Some(WarningKind::Missing)),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(_) => None,
    };

    match parsed {
        Some(n) if n.is_finite() => (n, None),
        _ => (0.0, Some(WarningKind::Unparseable)),
    }
}

/// Amount paid cannot exceed the amount engaged, nor drop below zero.
pub fn cap_paid_amount(montant_paye: f64, montant_total: f64) -> f64 {
    montant_paye.min(montant_total).max(0.0)
}

/// Case-insensitive synonym lookup; anything else resolves to "En cours".
pub fn standardize_statut(value: Option<&Value>) -> (Statut, Option<WarningKind>) {
    match value {
        None | Some(Value::Null) => (Statut::default(), Some(WarningKind::Missing)),
        Some(Value::String(s)) => {
            let lowered = s.to_lowercase();
            STATUT_SYNONYMS
                .iter()
                .find(|(synonym, _)| *synonym == lowered)
                .map(|(_, statut)| (*statut, None))
                .unwrap_or((Statut::default(), Some(WarningKind::Unrecognized)))
        }
        Some(_) => (Statut::default(), Some(WarningKind::Unrecognized)),
    }
}

pub fn is_amount_in_range(montant_total: f64) -> bool {
    montant_total > MIN_AMOUNT && montant_total < MAX_AMOUNT
}

pub fn clamp_rate(taux_realisation: f64) -> f64 {
    taux_realisation.clamp(0.0, 100.0)
}

fn text_field(raw: &RawRecord, field: &str) -> String {
    match raw.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_programme_synonyms() {
        let cases = [
            ("ERDF", Programme::Feder),
            ("ESF", Programme::Fse),
            ("FSE+", Programme::Fse),
            ("FEADER", Programme::Feader),
            ("INTERREG", Programme::Interreg),
        ];
        for (input, expected) in cases {
            let (programme, issue) = standardize_programme(Some(&json!(input)));
            assert_eq!(programme, expected, "input {input}");
            assert!(issue.is_none());
        }
    }

    #[test]
    fn test_programme_lookup_is_exact() {
        let (programme, issue) = standardize_programme(Some(&json!("feader")));
        assert_eq!(programme, Programme::Feder);
        assert_eq!(issue, Some(WarningKind::Unrecognized));

        let (programme, issue) = standardize_programme(Some(&json!(42)));
        assert_eq!(programme, Programme::Feder);
        assert_eq!(issue, Some(WarningKind::Unrecognized));

        let (_, issue) = standardize_programme(None);
        assert_eq!(issue, Some(WarningKind::Missing));
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(Some(&json!(1500))), (1500.0, None));
        assert_eq!(coerce_number(Some(&json!(" 2500.5 "))), (2500.5, None));
        assert_eq!(coerce_number(Some(&json!("1e6"))), (1_000_000.0, None));
        assert_eq!(coerce_number(Some(&json!(true))), (1.0, None));
        assert_eq!(
            coerce_number(Some(&json!("50 000 €"))),
            (0.0, Some(WarningKind::Unparseable))
        );
        assert_eq!(
            coerce_number(Some(&json!("NaN"))),
            (0.0, Some(WarningKind::Unparseable))
        );
        assert_eq!(
            coerce_number(Some(&json!([1, 2]))),
            (0.0, Some(WarningKind::Unparseable))
        );
        assert_eq!(coerce_number(None), (0.0, Some(WarningKind::Missing)));
    }

    #[test]
    fn test_cap_paid_amount() {
        assert_eq!(cap_paid_amount(80_000.0, 50_000.0), 50_000.0);
        assert_eq!(cap_paid_amount(10_000.0, 50_000.0), 10_000.0);
        assert_eq!(cap_paid_amount(-5.0, 50_000.0), 0.0);
    }

    #[test]
    fn test_statut_is_case_insensitive() {
        for input in ["COMPLETED", "Completed", "terminé", "TERMINÉ"] {
            let (statut, issue) = standardize_statut(Some(&json!(input)));
            assert_eq!(statut, Statut::Termine, "input {input}");
            assert!(issue.is_none());
        }
        let (statut, _) = standardize_statut(Some(&json!("Finalisation")));
        assert_eq!(statut, Statut::EnFinalisation);
        let (statut, issue) = standardize_statut(Some(&json!("")));
        assert_eq!(statut, Statut::EnCours);
        assert_eq!(issue, Some(WarningKind::Unrecognized));
    }

    #[test]
    fn test_range_bounds_are_exclusive() {
        assert!(!is_amount_in_range(1_000.0));
        assert!(is_amount_in_range(1_000.01));
        assert!(is_amount_in_range(99_999_999.0));
        assert!(!is_amount_in_range(100_000_000.0));
        assert!(!is_amount_in_range(0.0));
    }

    #[test]
    fn test_report_tracks_defaults_and_drops() {
        let input = vec![
            raw(json!({
                "id": "A",
                "montant_total": "12000",
                "montant_paye": 20000,
                "taux_realisation": 140,
                "statut": "bientôt"
            })),
            raw(json!({ "id": "B", "montant_total": 500 })),
        ];

        let (table, report) = normalize_with_report(&input);

        assert_eq!(table.len(), 1);
        assert_eq!(report.input_records, 2);
        assert_eq!(report.kept_records, 1);
        assert_eq!(report.dropped_out_of_range, 1);

        let kept = &table[0];
        assert_eq!(kept.montant_paye, 12_000.0);
        assert_eq!(kept.taux_realisation, 100.0);
        assert_eq!(kept.statut, Statut::EnCours);

        let first: Vec<_> = report
            .warnings
            .iter()
            .filter(|w| w.record_index == 0)
            .map(|w| (w.field, w.kind))
            .collect();
        assert!(first.contains(&("programme", WarningKind::Missing)));
        assert!(first.contains(&("montant_paye", WarningKind::Capped)));
        assert!(first.contains(&("statut", WarningKind::Unrecognized)));
        assert!(first.contains(&("taux_realisation", WarningKind::Clamped)));
        assert_eq!(report.warnings_for("montant_paye").count(), 2);
    }

    #[test]
    fn test_text_fields_pass_through() {
        let input = vec![raw(json!({
            "id": 1234,
            "titre": "Parc éolien",
            "montant_total": 2_000_000,
            "commune": null
        }))];
        let table = normalize(&input);
        assert_eq!(table[0].id, "1234");
        assert_eq!(table[0].titre, "Parc éolien");
        assert_eq!(table[0].commune, "");
        assert_eq!(table[0].secteur, "");
    }
}
