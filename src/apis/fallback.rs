//! Last-resort demonstration dataset used when every source of a territory
//! came back empty.

use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

use crate::apis::territories::profiles_for;
use crate::clock::Clock;
use crate::domain::{RawRecord, Territory};

pub const SYNTHETIC_RECORD_COUNT: usize = 150;

const PROGRAMMES: [&str; 5] = ["FEDER", "FSE", "FEADER", "FSE+", "INTERREG"];

const SECTEURS: [&str; 10] = [
    "Agriculture",
    "Tourisme",
    "Recherche",
    "Formation",
    "Environnement",
    "Transport",
    "Santé",
    "Numérique",
    "Énergie",
    "Pêche",
];

const SOURCE_LABEL: &str = "Données de démonstration";

/// Generate [`SYNTHETIC_RECORD_COUNT`] plausible records for `territory`.
///
/// Deterministic for a seeded `rng` and a fixed `clock`.
pub fn synthetic_dataset<R: Rng>(
    territory: Territory,
    rng: &mut R,
    clock: &dyn Clock,
) -> Vec<RawRecord> {
    let today = clock.today();
    let communes = territory_communes(territory);

    (0..SYNTHETIC_RECORD_COUNT)
        .filter_map(|i| {
            let programme = PROGRAMMES.choose(rng).copied().unwrap_or("FEDER");
            let secteur = SECTEURS.choose(rng).copied().unwrap_or("Agriculture");
            let montant: f64 = rng.gen_range(50_000.0..=3_000_000.0);

            let date_debut = today - Duration::days(rng.gen_range(1..1095));
            let date_fin = date_debut + Duration::days(rng.gen_range(180..720));

            let (statut, ratio) = if date_fin < today {
                ("Terminé", 1.0)
            } else if date_fin > today + Duration::days(180) {
                ("En cours", rng.gen_range(0.3..0.8))
            } else {
                ("En finalisation", rng.gen_range(0.8..0.95))
            };

            let commune = communes.choose(rng).copied().unwrap_or(territory.label());

            let record = json!({
                "id": format!("{}_{}_{:04}", territory.code(), 2021 + i / 50, i % 50),
                "titre": format!("Projet {} n°{}", secteur.to_lowercase(), i + 1),
                "programme": programme,
                "secteur": secteur,
                "montant_total": round_to(montant, 2),
                "montant_paye": round_to(montant * ratio, 2),
                "statut": statut,
                "taux_realisation": round_to(ratio * 100.0, 1),
                "beneficiaire": format!("Bénéficiaire {}", i),
                "date_debut": date_debut.format("%Y-%m-%d").to_string(),
                "date_fin_prevue": date_fin.format("%Y-%m-%d").to_string(),
                "commune": commune,
                "source": SOURCE_LABEL,
            });
            match record {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            }
        })
        .collect()
}

fn territory_communes(territory: Territory) -> &'static [&'static str] {
    profiles_for(territory)
        .iter()
        .map(|profile| profile.communes)
        .find(|communes| !communes.is_empty())
        .unwrap_or(&[])
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::pipeline::normalize::normalize;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn clock() -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn test_synthetic_dataset_is_deterministic() {
        let a = synthetic_dataset(
            Territory::SaintPierreEtMiquelon,
            &mut StdRng::seed_from_u64(7),
            &clock(),
        );
        let b = synthetic_dataset(
            Territory::SaintPierreEtMiquelon,
            &mut StdRng::seed_from_u64(7),
            &clock(),
        );
        assert_eq!(a, b);
        assert_eq!(a.len(), SYNTHETIC_RECORD_COUNT);
        assert_eq!(a[0]["id"], "SPM_2021_0000");
        assert_eq!(a[149]["id"], "SPM_2023_0049");
    }

    #[test]
    fn test_synthetic_records_survive_normalization() {
        let records = synthetic_dataset(Territory::Reunion, &mut StdRng::seed_from_u64(42), &clock());
        let table = normalize(&records);
        assert_eq!(table.len(), SYNTHETIC_RECORD_COUNT);
        assert!(table.iter().all(|r| r.montant_paye <= r.montant_total));
    }

    #[test]
    fn test_status_follows_end_date() {
        let today = clock().today();
        let records = synthetic_dataset(Territory::Martinique, &mut StdRng::seed_from_u64(3), &clock());
        for record in &records {
            let fin = NaiveDate::parse_from_str(record["date_fin_prevue"].as_str().unwrap(), "%Y-%m-%d")
                .unwrap();
            let taux = record["taux_realisation"].as_f64().unwrap();
            match record["statut"].as_str().unwrap() {
                "Terminé" => {
                    assert!(fin < today);
                    assert_eq!(taux, 100.0);
                }
                "En cours" => assert!((30.0..=80.0).contains(&taux)),
                "En finalisation" => assert!((80.0..=95.0).contains(&taux)),
                other => panic!("unexpected statut {other}"),
            }
        }
    }
}
