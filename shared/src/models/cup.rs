//! Cup score models (SCA protocol)
//!
//! Two rubric schemas coexist: the current checkbox/issue-count schema and
//! the legacy slider schema kept as a read-only migration source. Field
//! names serialize in camelCase so persisted documents stay compatible
//! with what the app has always written.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::{
    clamp_cup_count, clamp_level, clamp_score, step_score, CUPS_PER_FLIGHT,
};

fn default_score() -> Decimal {
    Decimal::new(600, 2)
}

fn default_level() -> i32 {
    3
}

fn default_issues() -> Vec<bool> {
    vec![false; CUPS_PER_FLIGHT]
}

/// The seven primary 0-10 attribute scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreAttribute {
    Fragrance,
    Flavor,
    Aftertaste,
    Acidity,
    Body,
    Balance,
    Overall,
}

impl ScoreAttribute {
    pub const ALL: [ScoreAttribute; 7] = [
        ScoreAttribute::Fragrance,
        ScoreAttribute::Flavor,
        ScoreAttribute::Aftertaste,
        ScoreAttribute::Acidity,
        ScoreAttribute::Body,
        ScoreAttribute::Balance,
        ScoreAttribute::Overall,
    ];
}

/// Consistency attributes scored by counting flawed cups in the flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyAttribute {
    Uniformity,
    CleanCup,
    Sweetness,
}

impl ConsistencyAttribute {
    pub const ALL: [ConsistencyAttribute; 3] = [
        ConsistencyAttribute::Uniformity,
        ConsistencyAttribute::CleanCup,
        ConsistencyAttribute::Sweetness,
    ];
}

/// One evaluator's record for one cup (current schema)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CupScore {
    #[serde(default)]
    pub cup_title: String,
    /// Roast level 1-5 (Light through Dark)
    #[serde(default = "default_level")]
    pub roast_level: i32,
    #[serde(default = "default_score")]
    pub fragrance: Decimal,
    #[serde(default = "default_level")]
    pub aroma_dry_intensity: i32,
    #[serde(default = "default_level")]
    pub aroma_break_intensity: i32,
    #[serde(default)]
    pub aroma_qualities: String,
    #[serde(default = "default_score")]
    pub flavor: Decimal,
    #[serde(default)]
    pub flavor_notes: String,
    #[serde(default = "default_score")]
    pub aftertaste: Decimal,
    #[serde(default)]
    pub aftertaste_notes: String,
    #[serde(default = "default_score")]
    pub acidity: Decimal,
    #[serde(default = "default_level")]
    pub acidity_intensity: i32,
    #[serde(default = "default_score")]
    pub body: Decimal,
    #[serde(default = "default_level")]
    pub body_level: i32,
    #[serde(default = "default_score")]
    pub balance: Decimal,
    /// One flag per reference cup in the flight; true marks a flawed cup.
    /// Always 5 entries when produced by this crate, but imported data is
    /// taken as-is, so consumers must not assume the length.
    #[serde(default = "default_issues")]
    pub uniformity_issues: Vec<bool>,
    #[serde(default = "default_issues")]
    pub clean_cup_issues: Vec<bool>,
    #[serde(default = "default_issues")]
    pub sweetness_issues: Vec<bool>,
    #[serde(default = "default_score")]
    pub overall: Decimal,
    /// Cups deducting 2 points each
    #[serde(default)]
    pub taint_cups: i32,
    /// Cups deducting 4 points each
    #[serde(default)]
    pub fault_cups: i32,
    #[serde(default)]
    pub notes: String,
}

impl Default for CupScore {
    fn default() -> Self {
        Self {
            cup_title: String::new(),
            roast_level: default_level(),
            fragrance: default_score(),
            aroma_dry_intensity: default_level(),
            aroma_break_intensity: default_level(),
            aroma_qualities: String::new(),
            flavor: default_score(),
            flavor_notes: String::new(),
            aftertaste: default_score(),
            aftertaste_notes: String::new(),
            acidity: default_score(),
            acidity_intensity: default_level(),
            body: default_score(),
            body_level: default_level(),
            balance: default_score(),
            uniformity_issues: default_issues(),
            clean_cup_issues: default_issues(),
            sweetness_issues: default_issues(),
            overall: default_score(),
            taint_cups: 0,
            fault_cups: 0,
            notes: String::new(),
        }
    }
}

impl CupScore {
    /// Read one of the seven primary attribute scores
    pub fn score(&self, attr: ScoreAttribute) -> Decimal {
        match attr {
            ScoreAttribute::Fragrance => self.fragrance,
            ScoreAttribute::Flavor => self.flavor,
            ScoreAttribute::Aftertaste => self.aftertaste,
            ScoreAttribute::Acidity => self.acidity,
            ScoreAttribute::Body => self.body,
            ScoreAttribute::Balance => self.balance,
            ScoreAttribute::Overall => self.overall,
        }
    }

    fn score_mut(&mut self, attr: ScoreAttribute) -> &mut Decimal {
        match attr {
            ScoreAttribute::Fragrance => &mut self.fragrance,
            ScoreAttribute::Flavor => &mut self.flavor,
            ScoreAttribute::Aftertaste => &mut self.aftertaste,
            ScoreAttribute::Acidity => &mut self.acidity,
            ScoreAttribute::Body => &mut self.body,
            ScoreAttribute::Balance => &mut self.balance,
            ScoreAttribute::Overall => &mut self.overall,
        }
    }

    /// Set a primary attribute score, clamped to [0.00, 10.00] with the
    /// canonical two-decimal representation
    pub fn set_score(&mut self, attr: ScoreAttribute, value: Decimal) {
        *self.score_mut(attr) = clamp_score(value);
    }

    /// Step a primary attribute score up by 0.25
    pub fn increment_score(&mut self, attr: ScoreAttribute) {
        let current = self.score(attr);
        *self.score_mut(attr) = step_score(current, true);
    }

    /// Step a primary attribute score down by 0.25
    pub fn decrement_score(&mut self, attr: ScoreAttribute) {
        let current = self.score(attr);
        *self.score_mut(attr) = step_score(current, false);
    }

    pub fn set_roast_level(&mut self, value: i32) {
        self.roast_level = clamp_level(value);
    }

    pub fn set_aroma_dry_intensity(&mut self, value: i32) {
        self.aroma_dry_intensity = clamp_level(value);
    }

    pub fn set_aroma_break_intensity(&mut self, value: i32) {
        self.aroma_break_intensity = clamp_level(value);
    }

    pub fn set_acidity_intensity(&mut self, value: i32) {
        self.acidity_intensity = clamp_level(value);
    }

    pub fn set_body_level(&mut self, value: i32) {
        self.body_level = clamp_level(value);
    }

    /// Read the issue flags for a consistency attribute
    pub fn issues(&self, attr: ConsistencyAttribute) -> &[bool] {
        match attr {
            ConsistencyAttribute::Uniformity => &self.uniformity_issues,
            ConsistencyAttribute::CleanCup => &self.clean_cup_issues,
            ConsistencyAttribute::Sweetness => &self.sweetness_issues,
        }
    }

    fn issues_mut(&mut self, attr: ConsistencyAttribute) -> &mut Vec<bool> {
        match attr {
            ConsistencyAttribute::Uniformity => &mut self.uniformity_issues,
            ConsistencyAttribute::CleanCup => &mut self.clean_cup_issues,
            ConsistencyAttribute::Sweetness => &mut self.sweetness_issues,
        }
    }

    /// Flag or clear one reference cup for a consistency attribute.
    /// Out-of-range indexes are ignored.
    pub fn set_issue(&mut self, attr: ConsistencyAttribute, index: usize, flagged: bool) {
        let issues = self.issues_mut(attr);
        if let Some(slot) = issues.get_mut(index) {
            *slot = flagged;
        }
    }

    /// Toggle one reference cup flag for a consistency attribute
    pub fn toggle_issue(&mut self, attr: ConsistencyAttribute, index: usize) {
        let issues = self.issues_mut(attr);
        if let Some(slot) = issues.get_mut(index) {
            *slot = !*slot;
        }
    }

    /// Set the taint cup count, clamped to [0, 5]
    pub fn set_taint_cups(&mut self, value: i32) {
        self.taint_cups = clamp_cup_count(value);
    }

    /// Set the fault cup count, clamped to [0, 5]
    pub fn set_fault_cups(&mut self, value: i32) {
        self.fault_cups = clamp_cup_count(value);
    }

    /// Flag one more tainted cup. Returns false (unchanged) when the
    /// combined taint + fault count would exceed the flight size.
    pub fn add_taint_cup(&mut self) -> bool {
        if self.taint_cups + self.fault_cups >= CUPS_PER_FLIGHT as i32 {
            return false;
        }
        self.taint_cups += 1;
        true
    }

    /// Flag one more faulted cup. Returns false (unchanged) when the
    /// combined taint + fault count would exceed the flight size.
    pub fn add_fault_cup(&mut self) -> bool {
        if self.taint_cups + self.fault_cups >= CUPS_PER_FLIGHT as i32 {
            return false;
        }
        self.fault_cups += 1;
        true
    }

    pub fn remove_taint_cup(&mut self) {
        self.taint_cups = clamp_cup_count(self.taint_cups - 1);
    }

    pub fn remove_fault_cup(&mut self) {
        self.fault_cups = clamp_cup_count(self.fault_cups - 1);
    }
}

/// Defect severity in the legacy schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefectType {
    #[default]
    None,
    /// 2 points per affected cup
    Taint,
    /// 4 points per affected cup
    Fault,
}

/// One evaluator's record for one cup in the legacy slider schema.
/// Read-only: only ever deserialized as a migration source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCupScore {
    #[serde(default)]
    pub cup_title: String,
    #[serde(default = "default_score")]
    pub fragrance: Decimal,
    #[serde(default = "default_score")]
    pub flavor: Decimal,
    #[serde(default = "default_score")]
    pub aftertaste: Decimal,
    #[serde(default = "default_score")]
    pub acidity: Decimal,
    #[serde(default = "default_score")]
    pub body: Decimal,
    #[serde(default = "default_score")]
    pub balance: Decimal,
    #[serde(default = "default_score")]
    pub overall: Decimal,
    /// Aggregate consistency scores in {0,2,4,6,8,10}; None when the
    /// stored record never carried the field
    #[serde(default)]
    pub uniformity: Option<Decimal>,
    #[serde(default)]
    pub clean_cup: Option<Decimal>,
    #[serde(default)]
    pub sweetness: Option<Decimal>,
    #[serde(default)]
    pub defect_type: DefectType,
    #[serde(default)]
    pub defect_count: i32,
    /// Free-text aroma description some legacy records carried
    #[serde(default)]
    pub aroma: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl Default for LegacyCupScore {
    fn default() -> Self {
        Self {
            cup_title: String::new(),
            fragrance: default_score(),
            flavor: default_score(),
            aftertaste: default_score(),
            acidity: default_score(),
            body: default_score(),
            balance: default_score(),
            overall: default_score(),
            uniformity: None,
            clean_cup: None,
            sweetness: None,
            defect_type: DefectType::None,
            defect_count: 0,
            aroma: None,
            notes: String::new(),
        }
    }
}
