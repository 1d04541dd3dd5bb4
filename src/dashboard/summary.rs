use serde::Serialize;

use crate::domain::{FundRecord, Programme, Statut};

/// Totals for one programme or secteur
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStat {
    pub label: String,
    pub total: f64,
    pub paye: f64,
    pub count: usize,
}

impl GroupStat {
    fn new(label: String) -> Self {
        Self {
            label,
            total: 0.0,
            paye: 0.0,
            count: 0,
        }
    }

    fn add(&mut self, record: &FundRecord) {
        self.total += record.montant_total;
        self.paye += record.montant_paye;
        self.count += 1;
    }
}

/// Aggregates shown above the project table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub project_count: usize,
    pub total_engage: f64,
    pub total_paye: f64,
    /// Paid share of the engaged total, in percent; 0 when nothing is engaged
    pub paid_percent: f64,
    pub completed_count: usize,
    pub completed_percent: f64,
    /// Mean completion rate, 0 for an empty selection
    pub mean_taux_realisation: f64,
    /// Distinct sources in first-seen order
    pub sources: Vec<String>,
    /// One entry per programme present, in `Programme::ALL` order
    pub par_programme: Vec<GroupStat>,
    /// One entry per secteur present, ascending by engaged total
    pub par_secteur: Vec<GroupStat>,
}

impl Summary {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a FundRecord>,
    {
        let mut summary = Summary::default();
        let mut taux_sum = 0.0;
        let mut programmes: Vec<(Programme, GroupStat)> = Vec::new();

        for record in records {
            summary.project_count += 1;
            summary.total_engage += record.montant_total;
            summary.total_paye += record.montant_paye;
            taux_sum += record.taux_realisation;
            if record.statut == Statut::Termine {
                summary.completed_count += 1;
            }
            if !summary.sources.contains(&record.source) {
                summary.sources.push(record.source.clone());
            }

            match programmes.iter_mut().find(|(p, _)| *p == record.programme) {
                Some((_, stat)) => stat.add(record),
                None => {
                    let mut stat = GroupStat::new(record.programme.to_string());
                    stat.add(record);
                    programmes.push((record.programme, stat));
                }
            }

            match summary
                .par_secteur
                .iter_mut()
                .find(|s| s.label == record.secteur)
            {
                Some(stat) => stat.add(record),
                None => {
                    let mut stat = GroupStat::new(record.secteur.clone());
                    stat.add(record);
                    summary.par_secteur.push(stat);
                }
            }
        }

        if summary.total_engage > 0.0 {
            summary.paid_percent = summary.total_paye / summary.total_engage * 100.0;
        }
        if summary.project_count > 0 {
            let n = summary.project_count as f64;
            summary.completed_percent = summary.completed_count as f64 / n * 100.0;
            summary.mean_taux_realisation = taux_sum / n;
        }

        programmes.sort_by_key(|(p, _)| Programme::ALL.iter().position(|q| q == p));
        summary.par_programme = programmes.into_iter().map(|(_, stat)| stat).collect();
        summary
            .par_secteur
            .sort_by(|a, b| a.total.total_cmp(&b.total));
        summary
    }

    /// Largest engaged total among the secteurs, used to scale bar widths
    pub fn max_secteur_total(&self) -> f64 {
        self.par_secteur.iter().map(|s| s.total).fold(0.0, f64::max)
    }

    pub fn max_programme_total(&self) -> f64 {
        self.par_programme.iter().map(|s| s.total).fold(0.0, f64::max)
    }
}
