use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 依序執行 extract → transform → load，回傳寫出的檔案路徑
    pub async fn run(&self) -> Result<Vec<String>> {
        let started = Instant::now();
        tracing::info!("🚀 Starting herd report");

        tracing::info!("📥 Reading mating records...");
        let batch = self.pipeline.extract().await?;
        tracing::info!(
            "Read {} mating records ({} unreadable rows)",
            batch.records.len(),
            batch.skipped_rows
        );

        tracing::info!("🐄 Evaluating reproductive cycles...");
        let report = self.pipeline.transform(batch).await?;
        tracing::info!(
            "Evaluated {} matings ({} open, {} skipped), success rate {}%",
            report.summary.total_matings,
            report.summary.open_matings,
            report.summary.skipped_records,
            report.summary.success_rate
        );
        if report.summary.overdue_births > 0 {
            tracing::warn!("⚠️ {} births overdue", report.summary.overdue_births);
        }

        tracing::info!("💾 Writing report...");
        let outputs = self.pipeline.load(report).await?;
        tracing::info!("✅ Report finished in {:?}", started.elapsed());

        Ok(outputs)
    }
}
