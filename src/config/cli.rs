use crate::core::calendar::{parse_iso_date, today, DEFAULT_UPCOMING_WINDOW_DAYS};
use crate::core::profiles::{gestation_profile, DEFAULT_SPECIES};
use crate::domain::model::{CycleStatus, GestationProfile};
use crate::utils::error::{HerdError, Result};
use crate::utils::validation::{validate_range, Validate};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "herd-cycle")]
#[command(about = "Reproductive cycle dates and status for a single mating")]
pub struct CliConfig {
    #[arg(long, help = "Mating date (YYYY-MM-DD)")]
    pub mating_date: String,

    #[arg(long, default_value = DEFAULT_SPECIES)]
    pub species: String,

    #[arg(long, allow_negative_numbers = true, help = "Override the species gestation length")]
    pub gestation_days: Option<i64>,

    #[arg(long, allow_negative_numbers = true, help = "Override the species confirmation delay")]
    pub confirmation_days: Option<i64>,

    #[arg(long, help = "Evaluate as of this date instead of today (YYYY-MM-DD)")]
    pub reference_date: Option<String>,

    #[arg(long, default_value_t = DEFAULT_UPCOMING_WINDOW_DAYS)]
    pub within_days: i64,

    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn mating_date(&self) -> Result<NaiveDate> {
        parse_iso_date(&self.mating_date)
    }

    pub fn reference_date(&self) -> Result<NaiveDate> {
        match &self.reference_date {
            Some(value) => parse_iso_date(value),
            None => Ok(today()),
        }
    }

    /// 物種設定，命令列參數可覆寫天數
    pub fn profile(&self) -> GestationProfile {
        let mut profile = gestation_profile(&self.species);
        if let Some(days) = self.gestation_days {
            profile.gestation_days = days;
        }
        if let Some(days) = self.confirmation_days {
            profile.confirmation_days = days;
        }
        profile
    }

    pub fn evaluate(&self) -> Result<CycleStatus> {
        Ok(CycleStatus::evaluate(
            self.mating_date()?,
            &self.profile(),
            self.within_days,
            self.reference_date()?,
        ))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.mating_date()?;
        self.reference_date().map_err(|_| HerdError::InvalidConfigValueError {
            field: "reference_date".to_string(),
            value: self.reference_date.clone().unwrap_or_default(),
            reason: "Expected an ISO date (YYYY-MM-DD)".to_string(),
        })?;
        validate_range("within_days", self.within_days, 0, 365)
    }
}
