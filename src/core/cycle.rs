//! Reproductive cycle dates and phase classification.
//!
//! All functions are pure: the reference date ("today") is always passed in,
//! and every input is accepted as-is. Nothing here can fail.

use crate::core::calendar::{add_days, days_until, is_overdue, is_upcoming};
use crate::core::profiles::{DEFAULT_CONFIRMATION_DAYS, DEFAULT_GESTATION_DAYS};
use crate::domain::model::{CyclePhase, CycleStatus, GestationProfile, ReproductiveDates, Urgency};
use chrono::NaiveDate;

/// Days before the estimated birth date that count as `pre_birth`.
pub const PRE_BIRTH_WINDOW_DAYS: i64 = 7;

pub fn compute_reproductive_dates(
    mating_date: NaiveDate,
    gestation_days: i64,
    confirmation_days: i64,
) -> ReproductiveDates {
    ReproductiveDates {
        mating_date,
        confirmation_date: add_days(mating_date, confirmation_days),
        estimated_birth_date: add_days(mating_date, gestation_days),
    }
}

impl ReproductiveDates {
    /// Dates for the default bovine profile (283 / 45 days).
    pub fn bovine(mating_date: NaiveDate) -> Self {
        compute_reproductive_dates(mating_date, DEFAULT_GESTATION_DAYS, DEFAULT_CONFIRMATION_DAYS)
    }

    pub fn from_profile(mating_date: NaiveDate, profile: &GestationProfile) -> Self {
        compute_reproductive_dates(mating_date, profile.gestation_days, profile.confirmation_days)
    }

    pub fn phase_at(&self, reference: NaiveDate) -> CyclePhase {
        classify_phase(
            self.mating_date,
            self.confirmation_date,
            self.estimated_birth_date,
            reference,
        )
    }
}

/// Rules are checked in order; the first match wins.
///
/// `mating_date` is part of the signature for symmetry with
/// [`ReproductiveDates`] but does not influence the result.
pub fn classify_phase(
    _mating_date: NaiveDate,
    confirmation_date: NaiveDate,
    estimated_birth_date: NaiveDate,
    reference: NaiveDate,
) -> CyclePhase {
    let pre_birth_start = add_days(estimated_birth_date, -PRE_BIRTH_WINDOW_DAYS);

    if reference < confirmation_date {
        CyclePhase::PreConfirmation
    } else if reference == confirmation_date {
        CyclePhase::ConfirmationDue
    } else if reference < pre_birth_start {
        CyclePhase::Gestation
    } else if reference <= estimated_birth_date {
        CyclePhase::PreBirth
    } else if reference > estimated_birth_date {
        CyclePhase::OverdueBirth
    } else {
        // 前面的條件已涵蓋所有情況
        CyclePhase::OverdueConfirmation
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        "day"
    } else {
        "days"
    }
}

/// One status line per phase. Overdue phases report magnitudes, not signs.
pub fn describe_phase(phase: CyclePhase, days_until_confirmation: i64, days_until_birth: i64) -> String {
    match phase {
        CyclePhase::PreConfirmation => format!(
            "{} {} until pregnancy confirmation due",
            days_until_confirmation,
            plural(days_until_confirmation)
        ),
        CyclePhase::ConfirmationDue => "Pregnancy confirmation due today".to_string(),
        CyclePhase::Gestation => format!(
            "In gestation, {} {} until estimated birth",
            days_until_birth,
            plural(days_until_birth)
        ),
        CyclePhase::PreBirth => format!(
            "Birth imminent: {} {} remaining",
            days_until_birth,
            plural(days_until_birth)
        ),
        CyclePhase::OverdueBirth => {
            let overdue = days_until_birth.saturating_abs();
            format!("Birth overdue by {} {}", overdue, plural(overdue))
        }
        CyclePhase::OverdueConfirmation => {
            let overdue = days_until_confirmation.saturating_abs();
            format!("Confirmation overdue by {} {}", overdue, plural(overdue))
        }
    }
}

/// Percentage of successful matings rounded to the nearest integer; 0 when there are none.
pub fn success_rate(successful_matings: u64, total_matings: u64) -> u64 {
    if total_matings == 0 {
        return 0;
    }
    (successful_matings as f64 / total_matings as f64 * 100.0).round() as u64
}

impl Urgency {
    pub fn classify(target: NaiveDate, within_days: i64, reference: NaiveDate) -> Self {
        if is_overdue(target, reference) {
            Urgency::Overdue
        } else if is_upcoming(target, within_days, reference) {
            Urgency::Upcoming
        } else {
            Urgency::Scheduled
        }
    }
}

impl CycleStatus {
    pub fn evaluate(
        mating_date: NaiveDate,
        profile: &GestationProfile,
        within_days: i64,
        reference: NaiveDate,
    ) -> Self {
        let dates = ReproductiveDates::from_profile(mating_date, profile);
        let phase = dates.phase_at(reference);
        let days_until_confirmation = days_until(dates.confirmation_date, reference);
        let days_until_birth = days_until(dates.estimated_birth_date, reference);

        Self {
            dates,
            phase,
            days_until_confirmation,
            days_until_birth,
            description: describe_phase(phase, days_until_confirmation, days_until_birth),
            birth_urgency: Urgency::classify(dates.estimated_birth_date, within_days, reference),
        }
    }
}
