use crate::config::toml_config::ReportConfig;
use crate::core::profiles::ProfileTable;
use crate::core::report::{build_report, parse_mating_csv, render_csv, render_json};
use crate::core::{Pipeline, Storage};
use crate::domain::model::{HerdReport, MatingBatch};
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::path::Path;

pub const CSV_REPORT_FILE: &str = "cycle_report.csv";
pub const JSON_REPORT_FILE: &str = "cycle_report.json";

pub struct ReportPipeline<S: Storage> {
    pub(crate) storage: S,
    pub(crate) config: ReportConfig,
    pub(crate) profiles: ProfileTable,
    pub(crate) reference: NaiveDate,
}

impl<S: Storage> ReportPipeline<S> {
    /// 基準日與品種表在建立時就決定，整份報表共用同一個「今天」
    pub fn new(storage: S, config: ReportConfig) -> Result<Self> {
        let profiles = config.profile_table()?;
        let reference = config.reference_date()?;
        Ok(Self {
            storage,
            config,
            profiles,
            reference,
        })
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    fn output_file(&self, file_name: &str) -> String {
        Path::new(&self.config.report.output_path)
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ReportPipeline<S> {
    async fn extract(&self) -> Result<MatingBatch> {
        tracing::debug!("Reading mating records from: {}", self.config.report.input_path);
        let data = self.storage.read_file(&self.config.report.input_path).await?;
        parse_mating_csv(&data)
    }

    async fn transform(&self, data: MatingBatch) -> Result<HerdReport> {
        tracing::debug!(
            "Evaluating {} records as of {} ({} custom profiles)",
            data.records.len(),
            self.reference,
            self.profiles.custom_len()
        );
        let mut report = build_report(
            &data.records,
            &self.profiles,
            self.config.upcoming_window_days(),
            self.reference,
        );
        // 無法解析的 CSV 列與無效日期一起計入 skipped_records
        report.summary.skipped_records += data.skipped_rows;
        Ok(report)
    }

    async fn load(&self, report: HerdReport) -> Result<Vec<String>> {
        let mut outputs = Vec::new();

        if self.config.wants_format("csv") {
            let path = self.output_file(CSV_REPORT_FILE);
            self.storage.write_file(&path, &render_csv(&report)?).await?;
            outputs.push(path);
        }

        if self.config.wants_format("json") {
            let path = self.output_file(JSON_REPORT_FILE);
            self.storage.write_file(&path, &render_json(&report)?).await?;
            outputs.push(path);
        }

        tracing::debug!("Wrote {} report files", outputs.len());
        Ok(outputs)
    }
}
