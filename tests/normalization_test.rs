use fonds_scraper::domain::{Programme, RawRecord, Statut};
use fonds_scraper::pipeline::normalize::{normalize, normalize_with_report, WarningKind};
use serde_json::{json, Value};

fn raw(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be an object, got {other}"),
    }
}

fn messy_batch() -> Vec<RawRecord> {
    vec![
        raw(json!({
            "id": "ED_0001",
            "titre": "Réseau de chaleur",
            "programme": "ERDF",
            "secteur": "Énergie",
            "montant_total": "2500000",
            "montant_paye": 3_000_000,
            "statut": "COMPLETED",
            "taux_realisation": 150,
            "commune": "Fort-de-France",
            "source": "Europe Direct Martinique"
        })),
        raw(json!({
            "id": "REG_0002",
            "programme": "FSE+",
            "montant_total": 50_000,
            "montant_paye": 80_000,
            "statut": "in progress",
            "taux_realisation": -20
        })),
        raw(json!({"id": "tiny", "montant_total": 500, "montant_paye": 100})),
        raw(json!({"id": "huge", "montant_total": 250_000_000})),
        raw(json!({
            "id": "junk",
            "programme": 42,
            "montant_total": "beaucoup",
            "statut": null
        })),
        raw(json!({
            "id": "DG_0003",
            "programme": "INTERREG",
            "montant_total": 1_000_001.5,
            "montant_paye": "n/a",
            "statut": "Finalisation",
            "taux_realisation": "87.5"
        })),
        raw(json!({"id": "bare", "montant_total": 12_000})),
    ]
}

#[test]
fn test_output_records_satisfy_invariants() {
    let table = normalize(&messy_batch());
    assert!(!table.is_empty());

    for record in &table {
        assert!(0.0 <= record.montant_paye && record.montant_paye <= record.montant_total);
        assert!((0.0..=100.0).contains(&record.taux_realisation));
        assert!(record.montant_total > 1_000.0 && record.montant_total < 100_000_000.0);
        assert!(Programme::ALL.contains(&record.programme));
        assert!(Statut::ALL.contains(&record.statut));
    }
}

#[test]
fn test_documented_examples() {
    let table = normalize(&messy_batch());
    let by_id = |id: &str| table.iter().find(|r| r.id == id);

    let ed = by_id("ED_0001").expect("ERDF record kept");
    assert_eq!(ed.programme, Programme::Feder);
    assert_eq!(ed.statut, Statut::Termine);
    assert_eq!(ed.montant_total, 2_500_000.0);
    assert_eq!(ed.montant_paye, 2_500_000.0);
    assert_eq!(ed.taux_realisation, 100.0);

    let reg = by_id("REG_0002").expect("FSE+ record kept");
    assert_eq!(reg.programme, Programme::Fse);
    assert_eq!(reg.statut, Statut::EnCours);
    assert_eq!(reg.montant_paye, 50_000.0);
    assert_eq!(reg.taux_realisation, 0.0);

    assert!(by_id("tiny").is_none());
    assert!(by_id("huge").is_none());
    assert!(by_id("junk").is_none(), "unparseable total becomes 0 and is dropped");

    let dg = by_id("DG_0003").expect("INTERREG record kept");
    assert_eq!(dg.montant_paye, 0.0);
    assert_eq!(dg.statut, Statut::EnFinalisation);
    assert_eq!(dg.taux_realisation, 87.5);

    let bare = by_id("bare").expect("bare record kept");
    assert_eq!(bare.programme, Programme::Feder);
    assert_eq!(bare.statut, Statut::EnCours);
    assert_eq!(bare.titre, "");
}

#[test]
fn test_table_order_follows_input_order() {
    let ids: Vec<String> = normalize(&messy_batch()).into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["ED_0001", "REG_0002", "DG_0003", "bare"]);
}

#[test]
fn test_normalization_is_idempotent() {
    let once = normalize(&messy_batch());
    let again_input: Vec<RawRecord> = once.iter().map(|r| r.to_raw()).collect();
    let twice = normalize(&again_input);
    assert_eq!(once, twice);
}

#[test]
fn test_empty_input_gives_empty_table() {
    let (table, report) = normalize_with_report(&[]);
    assert!(table.is_empty());
    assert_eq!(report.input_records, 0);
    assert_eq!(report.kept_records, 0);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_report_lists_defaulted_fields() {
    let (table, report) = normalize_with_report(&messy_batch());
    assert_eq!(report.input_records, 7);
    assert_eq!(report.kept_records, table.len());
    assert_eq!(report.dropped_out_of_range, 3);

    assert!(report
        .warnings_for("montant_paye")
        .any(|w| w.record_index == 0 && w.kind == WarningKind::Capped));
    assert!(report
        .warnings_for("taux_realisation")
        .any(|w| w.record_index == 0 && w.kind == WarningKind::Clamped));
    assert!(report
        .warnings_for("programme")
        .any(|w| w.record_index == 4 && w.kind == WarningKind::Unrecognized));
    assert!(report
        .warnings_for("montant_total")
        .any(|w| w.record_index == 4 && w.kind == WarningKind::Unparseable));
    assert!(report
        .warnings_for("statut")
        .any(|w| w.record_index == 6 && w.kind == WarningKind::Missing));
}
