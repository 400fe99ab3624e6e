use crate::core::calendar::{format_iso_date, parse_iso_date};
use crate::core::cycle::success_rate;
use crate::core::profiles::ProfileTable;
use crate::domain::model::{
    CycleStatus, HerdReport, HerdSummary, MatingBatch, MatingOutcome, MatingRecord, ReportRow,
    Urgency,
};
use crate::utils::error::{HerdError, Result};
use chrono::NaiveDate;

/// Evaluates every mating record at `reference`.
///
/// Records whose mating date does not parse are skipped and counted in
/// `skipped_records`; they do not count towards the success rate. Open
/// matings count towards the rate but get no birth phase or badge.
pub fn build_report(
    records: &[MatingRecord],
    profiles: &ProfileTable,
    within_days: i64,
    reference: NaiveDate,
) -> HerdReport {
    let mut summary = HerdSummary {
        reference_date: format_iso_date(reference),
        ..HerdSummary::default()
    };
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        let mating_date = match parse_iso_date(&record.mating_date) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!("⚠️ Skipping animal '{}': {}", record.animal_id, e);
                summary.skipped_records += 1;
                continue;
            }
        };

        if !record.species.trim().is_empty() && !profiles.contains(&record.species) {
            tracing::debug!(
                "Unknown species '{}' for animal '{}', using bovine profile",
                record.species,
                record.animal_id
            );
        }
        let profile = profiles.lookup(&record.species);
        let status = CycleStatus::evaluate(mating_date, &profile, within_days, reference);

        summary.total_matings += 1;
        let row = match record.outcome {
            Some(MatingOutcome::Open) => {
                summary.open_matings += 1;
                open_row(record, profile.species, &status)
            }
            outcome => {
                if outcome == Some(MatingOutcome::Pregnant) {
                    summary.successful_matings += 1;
                }
                *summary.phase_counts.entry(status.phase).or_insert(0) += 1;
                match status.birth_urgency {
                    Urgency::Upcoming => summary.upcoming_births += 1,
                    Urgency::Overdue => summary.overdue_births += 1,
                    Urgency::Scheduled => {}
                }
                cycle_row(record, profile.species, status)
            }
        };
        rows.push(row);
    }

    summary.success_rate = success_rate(summary.successful_matings, summary.total_matings);
    HerdReport { summary, rows }
}

fn cycle_row(record: &MatingRecord, species: String, status: CycleStatus) -> ReportRow {
    ReportRow {
        animal_id: record.animal_id.clone(),
        species,
        mating_date: format_iso_date(status.dates.mating_date),
        confirmation_date: format_iso_date(status.dates.confirmation_date),
        estimated_birth_date: Some(format_iso_date(status.dates.estimated_birth_date)),
        phase: Some(status.phase),
        days_until_confirmation: status.days_until_confirmation,
        days_until_birth: Some(status.days_until_birth),
        birth_urgency: Some(status.birth_urgency),
        status: status.description,
    }
}

/// 未受孕：不會有預產期，只保留配種與確認日期
fn open_row(record: &MatingRecord, species: String, status: &CycleStatus) -> ReportRow {
    ReportRow {
        animal_id: record.animal_id.clone(),
        species,
        mating_date: format_iso_date(status.dates.mating_date),
        confirmation_date: format_iso_date(status.dates.confirmation_date),
        estimated_birth_date: None,
        phase: None,
        days_until_confirmation: status.days_until_confirmation,
        days_until_birth: None,
        birth_urgency: None,
        status: OPEN_STATUS.to_string(),
    }
}

pub const OPEN_STATUS: &str = "Open (not pregnant): no birth expected";

/// 1-based line where the failing record starts, if the reader tracked it.
fn error_line(err: &csv::Error) -> Option<u64> {
    err.position().map(|pos| pos.line())
}

/// Reads mating records from CSV bytes.
///
/// Rows that cannot be read are skipped with a warning and counted in
/// `skipped_rows`; a missing required column fails the whole file.
pub fn parse_mating_csv(data: &[u8]) -> Result<MatingBatch> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    for required in ["animal_id", "mating_date"] {
        if !headers.iter().any(|h| h == required) {
            return Err(HerdError::ProcessingError {
                message: format!("CSV header is missing the '{}' column", required),
            });
        }
    }

    let mut batch = MatingBatch::default();
    for result in reader.deserialize::<MatingRecord>() {
        match result {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                match error_line(&e) {
                    Some(line) => tracing::warn!("⚠️ Skipping CSV record at line {}: {}", line, e),
                    None => tracing::warn!("⚠️ Skipping CSV record: {}", e),
                }
                batch.skipped_rows += 1;
            }
        }
    }
    Ok(batch)
}

pub fn render_csv(report: &HerdReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in &report.rows {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| HerdError::ProcessingError {
        message: format!("Failed to flush CSV output: {}", e),
    })
}

pub fn render_json(report: &HerdReport) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CyclePhase;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, species: &str, mating_date: &str, outcome: Option<MatingOutcome>) -> MatingRecord {
        MatingRecord {
            animal_id: id.to_string(),
            species: species.to_string(),
            mating_date: mating_date.to_string(),
            outcome,
        }
    }

    #[test]
    fn test_build_report_summary() {
        let records = vec![
            record("cow-1", "bovine", "2025-01-01", Some(MatingOutcome::Pregnant)),
            record("cow-2", "", "2025-09-20", Some(MatingOutcome::Open)),
            record("mare-1", "equine", "2025-01-05", Some(MatingOutcome::Pregnant)),
            record("sow-1", "porcine", "2025-06-01", None),
            record("bad-1", "bovine", "not-a-date", Some(MatingOutcome::Pregnant)),
        ];
        let report = build_report(&records, &ProfileTable::new(), 7, date(2025, 10, 6));

        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.summary.reference_date, "2025-10-06");
        assert_eq!(report.summary.total_matings, 4);
        assert_eq!(report.summary.successful_matings, 2);
        assert_eq!(report.summary.open_matings, 1);
        assert_eq!(report.summary.success_rate, 50);
        assert_eq!(report.summary.skipped_records, 1);

        let cow = &report.rows[0];
        assert_eq!(cow.estimated_birth_date.as_deref(), Some("2025-10-11"));
        assert_eq!(cow.phase, Some(CyclePhase::PreBirth));
        assert_eq!(cow.birth_urgency, Some(Urgency::Upcoming));
        assert_eq!(cow.status, "Birth imminent: 5 days remaining");

        // species 為空時使用牛的設定
        assert_eq!(report.rows[1].species, "bovine");
        assert_eq!(report.rows[1].phase, None);

        // 2025-06-01 + 114 = 2025-09-23
        assert_eq!(report.rows[3].phase, Some(CyclePhase::OverdueBirth));
        assert_eq!(report.summary.overdue_births, 1);
        assert_eq!(report.summary.upcoming_births, 1);
        assert_eq!(report.summary.phase_counts.get(&CyclePhase::PreBirth), Some(&1));
        assert_eq!(report.summary.phase_counts.values().sum::<u64>(), 3);
    }

    #[test]
    fn test_open_mating_has_no_birth_expectation() {
        let records = vec![record("cow-1", "bovine", "2025-01-01", Some(MatingOutcome::Open))];
        let report = build_report(&records, &ProfileTable::new(), 7, date(2025, 10, 15));

        assert_eq!(report.summary.total_matings, 1);
        assert_eq!(report.summary.open_matings, 1);
        assert_eq!(report.summary.overdue_births, 0);
        assert_eq!(report.summary.upcoming_births, 0);
        assert!(report.summary.phase_counts.is_empty());

        let row = &report.rows[0];
        assert_eq!(row.confirmation_date, "2025-02-15");
        assert_eq!(row.estimated_birth_date, None);
        assert_eq!(row.phase, None);
        assert_eq!(row.days_until_birth, None);
        assert_eq!(row.birth_urgency, None);
        assert_eq!(row.status, OPEN_STATUS);
    }

    #[test]
    fn test_build_report_empty_herd() {
        let report = build_report(&[], &ProfileTable::new(), 7, date(2025, 1, 1));
        assert!(report.rows.is_empty());
        assert_eq!(report.summary.success_rate, 0);
    }

    #[test]
    fn test_parse_mating_csv_reads_outcomes_leniently() {
        let csv = "animal_id,species,mating_date,outcome\n\
                   cow-1,bovine,2025-01-01,pregnant\n\
                   cow-2,bovine,2025-01-01,Pregnant\n\
                   cow-3,bovine,2025-02-01,\n\
                   cow-4,bovine,2025-03-01,maybe\n\
                   cow-5,bovine,2025-03-01,OPEN\n";
        let batch = parse_mating_csv(csv.as_bytes()).unwrap();

        assert_eq!(batch.records.len(), 5);
        assert_eq!(batch.skipped_rows, 0);
        assert_eq!(batch.records[0].outcome, Some(MatingOutcome::Pregnant));
        assert_eq!(batch.records[1].outcome, Some(MatingOutcome::Pregnant));
        assert_eq!(batch.records[2].outcome, None);
        assert_eq!(batch.records[3].outcome, None);
        assert_eq!(batch.records[4].outcome, Some(MatingOutcome::Open));
    }

    #[test]
    fn test_parse_mating_csv_counts_unreadable_rows() {
        let csv = "animal_id,species,mating_date,outcome\n\
                   cow-1,bovine,2025-01-01,pregnant\n\
                   cow-2\n\
                   cow-3,bovine,2025-03-01,open\n";
        let batch = parse_mating_csv(csv.as_bytes()).unwrap();

        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped_rows, 1);
        assert_eq!(batch.records[1].animal_id, "cow-3");
    }

    #[test]
    fn test_error_line_follows_quoted_multiline_fields() {
        let csv = "animal_id,species,mating_date\n\"cow\n1\",bovine,2025-01-01\ncow-2\n";
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(csv.as_bytes());
        let results: Vec<_> = reader.deserialize::<MatingRecord>().collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().animal_id, "cow\n1");
        let err = results[1].as_ref().unwrap_err();
        assert_eq!(error_line(err), Some(4));
    }

    #[test]
    fn test_parse_mating_csv_requires_columns() {
        let csv = "id,date\ncow-1,2025-01-01\n";
        assert!(matches!(
            parse_mating_csv(csv.as_bytes()),
            Err(HerdError::ProcessingError { .. })
        ));
    }

    #[test]
    fn test_render_csv_header_and_values() {
        let records = vec![
            record("cow-1", "bovine", "2025-01-01", None),
            record("cow-2", "bovine", "2025-01-01", Some(MatingOutcome::Open)),
        ];
        let report = build_report(&records, &ProfileTable::new(), 7, date(2025, 2, 15));

        let csv = String::from_utf8(render_csv(&report).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "animal_id,species,mating_date,confirmation_date,estimated_birth_date,phase,\
             days_until_confirmation,days_until_birth,birth_urgency,status"
        );
        assert_eq!(
            lines.next().unwrap(),
            "cow-1,bovine,2025-01-01,2025-02-15,2025-10-11,confirmation_due,0,238,scheduled,\
             Pregnancy confirmation due today"
        );
        assert_eq!(
            lines.next().unwrap(),
            "cow-2,bovine,2025-01-01,2025-02-15,,,0,,,Open (not pregnant): no birth expected"
        );
    }

    #[test]
    fn test_render_json_contains_summary() {
        let records = vec![record("cow-1", "bovine", "2025-01-01", Some(MatingOutcome::Pregnant))];
        let report = build_report(&records, &ProfileTable::new(), 7, date(2025, 2, 15));

        let value: serde_json::Value = serde_json::from_slice(&render_json(&report).unwrap()).unwrap();
        assert_eq!(value["summary"]["success_rate"], 100);
        assert_eq!(value["summary"]["phase_counts"]["confirmation_due"], 1);
        assert_eq!(value["rows"][0]["phase"], "confirmation_due");
    }
}
