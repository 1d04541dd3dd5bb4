use chrono::NaiveDateTime;
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::domain::{FundRecord, Territory, FIELD_NAMES};
use crate::error::Result;

pub const CSV_DELIMITER: u8 = b';';

/// Write `records` as `;`-separated UTF-8 with a header row
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a FundRecord>,
{
    let mut csv = WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_writer(writer);
    csv.write_record(FIELD_NAMES)?;
    for record in records {
        csv.write_record(record.to_row())?;
    }
    csv.flush()?;
    Ok(())
}

pub fn to_csv_bytes<'a, I>(records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a FundRecord>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records)?;
    Ok(buffer)
}

pub fn export_to_file<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a FundRecord>,
{
    let file = std::fs::File::create(path)?;
    write_csv(file, records)?;
    info!("💾 Exported CSV to {}", path.display());
    Ok(())
}

/// `fonds_europeens_<territory>_<YYYYmmdd_HHMM>.csv`
pub fn export_filename(territory: Territory, at: NaiveDateTime) -> String {
    format!(
        "fonds_europeens_{}_{}.csv",
        territory.slug(),
        at.format("%Y%m%d_%H%M")
    )
}

/// `1234567.8` → `"1 234 568 €"`
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{} €", sign, grouped)
}
