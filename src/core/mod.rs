pub mod calendar;
pub mod cycle;
pub mod engine;
pub mod profiles;
pub mod report;

pub use crate::domain::model::{CyclePhase, CycleStatus, GestationProfile, ReproductiveDates, Urgency};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
