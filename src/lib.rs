pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use app::pipelines::ReportPipeline;
pub use config::toml_config::ReportConfig;
pub use crate::core::calendar::{
    add_days, days_until, format_iso_date, is_overdue, is_upcoming, parse_iso_date, today,
    DEFAULT_UPCOMING_WINDOW_DAYS,
};
pub use crate::core::cycle::{
    classify_phase, compute_reproductive_dates, describe_phase, success_rate,
    PRE_BIRTH_WINDOW_DAYS,
};
pub use crate::core::engine::ReportEngine;
pub use crate::core::profiles::{gestation_profile, ProfileTable};
pub use domain::model::{
    CyclePhase, CycleStatus, GestationProfile, HerdReport, HerdSummary, MatingBatch,
    MatingOutcome, MatingRecord, ReproductiveDates, Urgency,
};
pub use utils::error::{HerdError, Result};
