use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Gestation constants for one species or breed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestationProfile {
    pub species: String,
    pub gestation_days: i64,
    pub confirmation_days: i64,
}

/// Dates derived from a single mating event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReproductiveDates {
    pub mating_date: NaiveDate,
    pub confirmation_date: NaiveDate,
    pub estimated_birth_date: NaiveDate,
}

/// Where a reproductive cycle stands relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    PreConfirmation,
    ConfirmationDue,
    Gestation,
    PreBirth,
    OverdueConfirmation,
    OverdueBirth,
}

impl CyclePhase {
    pub const ALL: [CyclePhase; 6] = [
        CyclePhase::PreConfirmation,
        CyclePhase::ConfirmationDue,
        CyclePhase::Gestation,
        CyclePhase::PreBirth,
        CyclePhase::OverdueConfirmation,
        CyclePhase::OverdueBirth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CyclePhase::PreConfirmation => "pre_confirmation",
            CyclePhase::ConfirmationDue => "confirmation_due",
            CyclePhase::Gestation => "gestation",
            CyclePhase::PreBirth => "pre_birth",
            CyclePhase::OverdueConfirmation => "overdue_confirmation",
            CyclePhase::OverdueBirth => "overdue_birth",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CyclePhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CyclePhase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| format!("unknown cycle phase: {}", s))
    }
}

/// Badge level for a single due date in reminder lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    Upcoming,
    Scheduled,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Urgency::Overdue => "overdue",
            Urgency::Upcoming => "upcoming",
            Urgency::Scheduled => "scheduled",
        })
    }
}

/// Snapshot of one mating evaluated at a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStatus {
    #[serde(flatten)]
    pub dates: ReproductiveDates,
    pub phase: CyclePhase,
    pub days_until_confirmation: i64,
    pub days_until_birth: i64,
    pub description: String,
    pub birth_urgency: Urgency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatingOutcome {
    Pregnant,
    Open,
}

impl MatingOutcome {
    /// Case-insensitive; anything else is treated as "not recorded".
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pregnant" => Some(MatingOutcome::Pregnant),
            "open" => Some(MatingOutcome::Open),
            _ => None,
        }
    }
}

fn lenient_outcome<'de, D>(deserializer: D) -> Result<Option<MatingOutcome>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let outcome = MatingOutcome::parse_lenient(&value);
        if outcome.is_none() && !value.trim().is_empty() {
            tracing::warn!("⚠️ Unknown mating outcome '{}', treating as not recorded", value);
        }
        outcome
    }))
}

/// One row of the herd mating CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatingRecord {
    pub animal_id: String,
    #[serde(default)]
    pub species: String,
    pub mating_date: String,
    #[serde(default, deserialize_with = "lenient_outcome")]
    pub outcome: Option<MatingOutcome>,
}

/// Records read from the herd CSV plus the number of rows that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatingBatch {
    pub records: Vec<MatingRecord>,
    pub skipped_rows: u64,
}

/// One evaluated report line; dates are ISO strings so the row can go straight to CSV.
///
/// Open matings carry no birth expectation: the birth columns, phase and
/// badge stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub animal_id: String,
    pub species: String,
    pub mating_date: String,
    pub confirmation_date: String,
    pub estimated_birth_date: Option<String>,
    pub phase: Option<CyclePhase>,
    pub days_until_confirmation: i64,
    pub days_until_birth: Option<i64>,
    pub birth_urgency: Option<Urgency>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerdSummary {
    pub reference_date: String,
    pub total_matings: u64,
    pub successful_matings: u64,
    pub open_matings: u64,
    pub success_rate: u64,
    pub skipped_records: u64,
    pub upcoming_births: u64,
    pub overdue_births: u64,
    pub phase_counts: BTreeMap<CyclePhase, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerdReport {
    pub summary: HerdSummary,
    pub rows: Vec<ReportRow>,
}
