use crate::core::calendar::{parse_iso_date, today, DEFAULT_UPCOMING_WINDOW_DAYS};
use crate::core::profiles::ProfileTable;
use crate::utils::error::{HerdError, Result};
use crate::utils::validation::{
    validate_gestation_days, validate_non_empty_string, validate_output_formats, validate_path,
    validate_range, Validate,
};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub report: ReportSection,
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub name: String,
    pub input_path: String,
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub reference_date: Option<String>,
    pub upcoming_window_days: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub gestation_days: i64,
    pub confirmation_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
}

impl ReportConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HerdError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HERD_DATA_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HerdError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("report.name", &self.report.name)?;
        validate_path("report.input_path", &self.report.input_path)?;
        validate_path("report.output_path", &self.report.output_path)?;
        validate_output_formats("report.output_formats", &self.report.output_formats, &OUTPUT_FORMATS)?;

        if let Some(days) = self.report.upcoming_window_days {
            validate_range("report.upcoming_window_days", days, 0, 365)?;
        }

        if let Some(reference) = &self.report.reference_date {
            parse_iso_date(reference).map_err(|_| HerdError::InvalidConfigValueError {
                field: "report.reference_date".to_string(),
                value: reference.clone(),
                reason: "Expected an ISO date (YYYY-MM-DD)".to_string(),
            })?;
        }

        for (name, profile) in &self.profiles {
            validate_non_empty_string("profiles", name)?;
            validate_gestation_days(
                &format!("profiles.{}", name),
                profile.gestation_days,
                profile.confirmation_days,
            )?;
        }

        Ok(())
    }

    /// 未指定時以今天 (UTC) 為基準日
    pub fn reference_date(&self) -> Result<NaiveDate> {
        match &self.report.reference_date {
            Some(value) => parse_iso_date(value),
            None => Ok(today()),
        }
    }

    pub fn upcoming_window_days(&self) -> i64 {
        self.report
            .upcoming_window_days
            .unwrap_or(DEFAULT_UPCOMING_WINDOW_DAYS)
    }

    pub fn profile_table(&self) -> Result<ProfileTable> {
        let mut table = ProfileTable::new();
        for (name, profile) in &self.profiles {
            table.insert(name, profile.gestation_days, profile.confirmation_days)?;
        }
        Ok(table)
    }

    pub fn wants_format(&self, format: &str) -> bool {
        self.report.output_formats.iter().any(|f| f == format)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
