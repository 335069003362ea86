//! Session export
//!
//! JSON exports are the session record serialized verbatim, so an export
//! re-imported later round-trips through the schema migration untouched.
//! CSV exports flatten one row per cup with the derived columns
//! (consistency scores, defect deduction, total) computed by the scoring
//! engine rather than read from storage.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};

use shared::models::{ConsistencyAttribute, CupScore, Session};
use shared::score::{compute_total, consistency_score, defect_deduction};

use crate::error::AppResult;

/// UTF-8 byte-order mark, prepended so spreadsheet tools pick the right
/// encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Fixed CSV column schema, one row per cup
pub const CSV_HEADERS: [&str; 24] = [
    "Cup",
    "Roast Level",
    "Fragrance/Aroma",
    "Aroma Dry Intensity",
    "Aroma Break Intensity",
    "Aroma Qualities",
    "Flavor",
    "Flavor Notes",
    "Aftertaste",
    "Aftertaste Notes",
    "Acidity",
    "Acidity Intensity",
    "Body",
    "Body Level",
    "Balance",
    "Uniformity",
    "Clean Cup",
    "Sweetness",
    "Overall",
    "Taint Cups",
    "Fault Cups",
    "Defect Deduction",
    "Total",
    "Notes",
];

/// Serialize a session to pretty-printed JSON, structure verbatim
pub fn session_json(session: &Session) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(session)?)
}

/// Render a session as CSV: UTF-8 with a leading BOM, text fields quoted
/// with embedded quotes doubled, numeric fields bare
pub fn session_csv(session: &Session) -> AppResult<Vec<u8>> {
    let mut buf = Vec::from(UTF8_BOM);
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(&mut buf);

    writer.write_record(CSV_HEADERS)?;
    for (index, cup) in session.cup_scores.iter().enumerate() {
        writer.write_record(csv_row(cup, index))?;
    }
    writer.flush()?;
    drop(writer);

    Ok(buf)
}

fn csv_row(cup: &CupScore, index: usize) -> Vec<String> {
    let title = if cup.cup_title.is_empty() {
        format!("Cup #{}", index + 1)
    } else {
        cup.cup_title.clone()
    };

    vec![
        title,
        cup.roast_level.to_string(),
        cup.fragrance.to_string(),
        cup.aroma_dry_intensity.to_string(),
        cup.aroma_break_intensity.to_string(),
        cup.aroma_qualities.clone(),
        cup.flavor.to_string(),
        cup.flavor_notes.clone(),
        cup.aftertaste.to_string(),
        cup.aftertaste_notes.clone(),
        cup.acidity.to_string(),
        cup.acidity_intensity.to_string(),
        cup.body.to_string(),
        cup.body_level.to_string(),
        cup.balance.to_string(),
        consistency_score(cup.issues(ConsistencyAttribute::Uniformity)).to_string(),
        consistency_score(cup.issues(ConsistencyAttribute::CleanCup)).to_string(),
        consistency_score(cup.issues(ConsistencyAttribute::Sweetness)).to_string(),
        cup.overall.to_string(),
        cup.taint_cups.to_string(),
        cup.fault_cups.to_string(),
        // rendered with a leading minus, deduction-style
        format!("-{}", defect_deduction(cup)),
        compute_total(cup).to_string(),
        cup.notes.clone(),
    ]
}

/// Export file name for a session: `cupping-<id>.json`
pub fn json_file_name(session: &Session) -> String {
    format!("cupping-{}.json", session.id)
}

/// Export file name for a session: `cupping-<id>.csv`
pub fn csv_file_name(session: &Session) -> String {
    format!("cupping-{}.csv", session.id)
}

/// Write the JSON export under `dir`, returning the file path
pub fn write_json(session: &Session, dir: &Path) -> AppResult<PathBuf> {
    let path = dir.join(json_file_name(session));
    fs::create_dir_all(dir)?;
    fs::write(&path, session_json(session)?)?;
    Ok(path)
}

/// Write the CSV export under `dir`, returning the file path
pub fn write_csv(session: &Session, dir: &Path) -> AppResult<PathBuf> {
    let path = dir.join(csv_file_name(session));
    fs::create_dir_all(dir)?;
    fs::write(&path, session_csv(session)?)?;
    Ok(path)
}
