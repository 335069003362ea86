//! Legacy-to-current schema migration
//!
//! Persisted cup records come in two shapes: the legacy slider schema
//! (aggregate consistency scores, single defect type/count) and the
//! current checkbox schema. Stored documents may mix both within one
//! session, so classification happens per cup, and migration is total:
//! whatever the input looks like, a valid current-schema record comes out.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{CupScore, DefectType, LegacyCupScore, Session};
use crate::validation::CUPS_PER_FLIGHT;

/// A persisted cup record, classified by schema
#[derive(Debug, Clone, PartialEq)]
pub enum CupRecord {
    Legacy(LegacyCupScore),
    Current(CupScore),
}

impl CupRecord {
    /// Classify a raw record. A record is legacy iff it carries a
    /// `defectType` field and lacks `taintCups`; anything else is read as
    /// current-schema with absent fields default-filled. Records that do
    /// not deserialize at all collapse to the documented defaults.
    pub fn from_value(value: Value) -> Self {
        let is_legacy = value.get("defectType").is_some() && value.get("taintCups").is_none();
        if is_legacy {
            CupRecord::Legacy(serde_json::from_value(value).unwrap_or_default())
        } else {
            CupRecord::Current(serde_json::from_value(value).unwrap_or_default())
        }
    }
}

/// Migrate one persisted cup record to the current schema. Total and
/// idempotent: current-schema input passes through with absent fields
/// default-filled, and input values always win over defaults.
pub fn migrate_cup(value: Value) -> CupScore {
    match CupRecord::from_value(value) {
        CupRecord::Current(cup) => cup,
        CupRecord::Legacy(legacy) => upgrade_legacy(&legacy),
    }
}

/// Map a legacy record onto the current schema, preserving as much signal
/// as the aggregate fields allow
pub fn upgrade_legacy(legacy: &LegacyCupScore) -> CupScore {
    let (taint_cups, fault_cups) = match legacy.defect_type {
        DefectType::Taint => (legacy.defect_count, 0),
        DefectType::Fault => (0, legacy.defect_count),
        DefectType::None => (0, 0),
    };

    // roast level, intensities and the per-attribute note fields have no
    // legacy source and keep their defaults
    CupScore {
        cup_title: legacy.cup_title.clone(),
        fragrance: legacy.fragrance,
        flavor: legacy.flavor,
        aftertaste: legacy.aftertaste,
        acidity: legacy.acidity,
        body: legacy.body,
        balance: legacy.balance,
        overall: legacy.overall,
        // the only legacy free text close to an aroma description
        aroma_qualities: legacy.aroma.clone().unwrap_or_default(),
        uniformity_issues: issues_from_aggregate(legacy.uniformity),
        clean_cup_issues: issues_from_aggregate(legacy.clean_cup),
        sweetness_issues: issues_from_aggregate(legacy.sweetness),
        taint_cups,
        fault_cups,
        notes: legacy.notes.clone(),
        ..CupScore::default()
    }
}

/// Reconstruct per-cup issue flags from a legacy aggregate score `s` in
/// {0,2,4,6,8,10}: cup `i` is flagged iff `i < 5 - floor(s / 2)`.
///
/// Best-effort, not a faithful restoration: the aggregate only records
/// how many of the five reference cups deviated, so issues are attributed
/// to the lowest-indexed slots. Absent or zero scores (falsy in the data
/// this migrates) yield an all-clear sequence.
fn issues_from_aggregate(score: Option<Decimal>) -> Vec<bool> {
    let Some(score) = score else {
        return vec![false; CUPS_PER_FLIGHT];
    };
    if score.is_zero() {
        return vec![false; CUPS_PER_FLIGHT];
    }
    let clean = (score / Decimal::TWO).floor().to_i64().unwrap_or(0);
    let flagged = 5 - clean;
    (0..CUPS_PER_FLIGHT as i64).map(|i| i < flagged).collect()
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawSession {
    id: String,
    title: String,
    date: String,
    is_complete: bool,
    num_cups: Option<usize>,
    session_notes: String,
    cup_scores: Vec<Value>,
}

/// Migrate one persisted session: session fields default-filled, every
/// cup record run through [`migrate_cup`]. `numCups` falls back to the
/// cup array length when the stored document never carried it.
pub fn migrate_session(value: Value) -> Session {
    let raw: RawSession = serde_json::from_value(value).unwrap_or_default();
    let cup_scores: Vec<CupScore> = raw.cup_scores.into_iter().map(migrate_cup).collect();
    Session {
        id: raw.id,
        title: raw.title,
        date: raw.date,
        is_complete: raw.is_complete,
        num_cups: raw.num_cups.unwrap_or(cup_scores.len()),
        session_notes: raw.session_notes,
        cup_scores,
    }
}
