//! A single monitoring run.
//!
//! Fetches terms, narrows them with the filter chain, aggregates the result
//! into a report and notifies the patient only when something is available.
//! Apart from the optional report export, the first failure ends the run.

use std::fs;
use std::path::{Path, PathBuf};

use slotwatch_types::{FilterCriteria, Report, TermQuery};
use thiserror::Error;

use crate::data::{aggregate, filter_terms};
use crate::notify::{Notifier, NotifyError};
use crate::render::render_message;
use crate::source::{FetchError, TermSource};

/// What a run decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The report was delivered once.
    Notified { overall_count: usize },
    /// Nothing matched, no notification was sent.
    NothingAvailable,
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Failed to fetch terms: {0}")]
    Fetch(#[source] FetchError),

    #[error("Found {overall_count} visits but the notification could not be sent: {source}")]
    Notify {
        overall_count: usize,
        #[source]
        source: NotifyError,
    },
}

/// Runs the fetch, filter, aggregate and notify pipeline.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use slotwatch::{ConsoleNotifier, MemorySource, Monitor, RunOutcome};
/// use slotwatch_types::TermQuery;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let query = TermQuery::new(5, 4502, date, date);
/// let criteria = query.criteria(Default::default());
///
/// let mut monitor = Monitor::new(
///     Box::new(MemorySource::new(Vec::new())),
///     Box::new(ConsoleNotifier::new()),
/// );
/// let outcome = monitor.run(&query, &criteria, "patient@example.com").unwrap();
/// assert_eq!(outcome, RunOutcome::NothingAvailable);
/// ```
#[derive(Debug)]
pub struct Monitor {
    source: Box<dyn TermSource>,
    notifier: Box<dyn Notifier>,
    export_path: Option<PathBuf>,
}

impl Monitor {
    pub fn new(source: Box<dyn TermSource>, notifier: Box<dyn Notifier>) -> Self {
        Self {
            source,
            notifier,
            export_path: None,
        }
    }

    /// Also write every report as pretty JSON to `path`, whether or not a
    /// notification follows. A failed export is logged and does not stop
    /// the notification.
    pub fn with_export(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = Some(path.into());
        self
    }

    /// Fetch, filter and aggregate.
    pub fn build_report(
        &mut self,
        query: &TermQuery,
        criteria: &FilterCriteria,
    ) -> Result<Report, MonitorError> {
        tracing::debug!("Fetching terms from {}", self.source.description());
        let days = self
            .source
            .fetch_terms(query)
            .map_err(MonitorError::Fetch)?;
        let filtered = filter_terms(days, criteria);
        Ok(aggregate(&filtered))
    }

    /// Send the report if it lists any visit.
    pub fn dispatch(&self, report: &Report, address: &str) -> Result<RunOutcome, MonitorError> {
        if !report.is_any_visit_available() {
            tracing::info!("There are no visits available. Notification will not be sent.");
            return Ok(RunOutcome::NothingAvailable);
        }

        tracing::info!("Visits have been found. Notification will be sent.");
        let overall_count = report.overall_count;
        let message = render_message(report);
        tracing::debug!("Notifying {} via {}", address, self.notifier.description());
        self.notifier
            .notify(address, &message)
            .map_err(|source| MonitorError::Notify {
                overall_count,
                source,
            })?;

        Ok(RunOutcome::Notified { overall_count })
    }

    /// One complete monitoring run.
    pub fn run(
        &mut self,
        query: &TermQuery,
        criteria: &FilterCriteria,
        address: &str,
    ) -> Result<RunOutcome, MonitorError> {
        let report = self.build_report(query, criteria)?;
        if let Some(path) = &self.export_path {
            match export_report(&report, path) {
                Ok(()) => tracing::info!("Report exported to {}", path.display()),
                Err(e) => tracing::warn!("Failed to export the report to {}: {}", path.display(), e),
            }
        }
        self.dispatch(&report, address)
    }
}

fn export_report(report: &Report, path: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use chrono::{NaiveDate, NaiveTime};
    use slotwatch_adapters::AdapterError;
    use slotwatch_types::{DayTerms, PartOfDay, Slot};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<(String, String)>>>,
        fail: bool,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, to: &str, message: &str) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), message.to_string()));
            if self.fail {
                Err(AdapterError::Smtp("mailbox unavailable".to_string()).into())
            } else {
                Ok(())
            }
        }

        fn description(&self) -> &str {
            "recording"
        }
    }

    #[derive(Debug)]
    struct FailingSource;

    impl TermSource for FailingSource {
        fn fetch_terms(&mut self, _query: &TermQuery) -> Result<Vec<DayTerms>, FetchError> {
            Err(AdapterError::Unavailable.into())
        }

        fn description(&self) -> &str {
            "failing"
        }
    }

    const CLINIC_X: u64 = 10;
    const CLINIC_Y: u64 = 20;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_days() -> Vec<DayTerms> {
        vec![DayTerms::new(
            date(10),
            vec![
                Slot::new(NaiveTime::from_hms_opt(9, 0, 0).unwrap(), "DocA", "ClinicX")
                    .with_clinic_id(1)
                    .with_part_of_day(PartOfDay::MORNING),
                Slot::new(NaiveTime::from_hms_opt(14, 0, 0).unwrap(), "DocB", "ClinicY")
                    .with_clinic_id(2)
                    .with_part_of_day(PartOfDay::MIDDAY),
            ],
        )]
    }

    fn query() -> TermQuery {
        TermQuery::new(5, 4502, date(1), date(30))
    }

    fn monitor(days: Vec<DayTerms>, notifier: &RecordingNotifier) -> Monitor {
        Monitor::new(Box::new(MemorySource::new(days)), Box::new(notifier.clone()))
    }

    /// One day with a morning slot at ClinicX and a midday slot at ClinicY.
    fn two_clinic_day() -> Vec<DayTerms> {
        vec![DayTerms::new(
            date(10),
            vec![
                Slot::new(at(9, 0), "DocA", "ClinicX")
                    .with_clinic_id(CLINIC_X)
                    .with_doctor_id(1)
                    .with_part_of_day(PartOfDay::MORNING),
                Slot::new(at(14, 0), "DocB", "ClinicY")
                    .with_clinic_id(CLINIC_Y)
                    .with_doctor_id(2)
                    .with_part_of_day(PartOfDay::MIDDAY),
            ],
        )]
    }

    /// Run once and return the outcome with the messages that were sent.
    fn run_once(
        days: Vec<DayTerms>,
        query: &TermQuery,
        part_of_day: PartOfDay,
    ) -> (RunOutcome, Vec<String>) {
        let notifier = RecordingNotifier::default();
        let mut monitor = monitor(days, &notifier);
        let outcome = monitor
            .run(query, &query.criteria(part_of_day), "patient@example.com")
            .unwrap();
        let messages = notifier
            .sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect();
        (outcome, messages)
    }

    #[test]
    fn test_visits_found_sends_once() {
        let notifier = RecordingNotifier::default();
        let mut monitor = monitor(sample_days(), &notifier);
        let query = query();

        let outcome = monitor
            .run(&query, &query.criteria(PartOfDay::ANY), "patient@example.com")
            .unwrap();

        assert_eq!(outcome, RunOutcome::Notified { overall_count: 2 });
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "patient@example.com");
        assert!(sent[0].1.starts_with("Overall number of visits: 2\n"));
        assert!(sent[0].1.contains("--------- REPORT DETAILS ---------"));
    }

    #[test]
    fn test_nothing_available_sends_nothing() {
        let notifier = RecordingNotifier::default();
        let mut monitor = monitor(sample_days(), &notifier);
        let query = query().with_clinic_id(Some(99));

        let outcome = monitor
            .run(&query, &query.criteria(PartOfDay::ANY), "patient@example.com")
            .unwrap();

        assert_eq!(outcome, RunOutcome::NothingAvailable);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_source_sends_nothing() {
        let notifier = RecordingNotifier::default();
        let mut monitor = monitor(Vec::new(), &notifier);
        let query = query();

        let outcome = monitor
            .run(&query, &query.criteria(PartOfDay::ANY), "patient@example.com")
            .unwrap();

        assert_eq!(outcome, RunOutcome::NothingAvailable);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_fetch_failure() {
        let notifier = RecordingNotifier::default();
        let mut monitor = Monitor::new(Box::new(FailingSource), Box::new(notifier.clone()));
        let query = query();

        let err = monitor
            .run(&query, &query.criteria(PartOfDay::ANY), "patient@example.com")
            .unwrap_err();

        assert!(matches!(
            err,
            MonitorError::Fetch(FetchError::Adapter(AdapterError::Unavailable))
        ));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_notify_failure_is_distinct() {
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };
        let mut monitor = monitor(sample_days(), &notifier);
        let query = query();

        let err = monitor
            .run(&query, &query.criteria(PartOfDay::MORNING), "patient@example.com")
            .unwrap_err();

        assert!(matches!(err, MonitorError::Notify { overall_count: 1, .. }));
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_dispatch_gating() {
        let notifier = RecordingNotifier::default();
        let monitor = monitor(Vec::new(), &notifier);

        let empty = monitor.dispatch(&Report::empty(), "a@example.com").unwrap();
        assert_eq!(empty, RunOutcome::NothingAvailable);

        let report = aggregate(&sample_days());
        let sent = monitor.dispatch(&report, "a@example.com").unwrap();
        assert_eq!(sent, RunOutcome::Notified { overall_count: 2 });
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_export_written_even_without_visits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let notifier = RecordingNotifier::default();
        let mut monitor = monitor(sample_days(), &notifier).with_export(&path);
        let query = query().with_doctor_id(Some(42));

        let outcome = monitor
            .run(&query, &query.criteria(PartOfDay::ANY), "patient@example.com")
            .unwrap();

        assert_eq!(outcome, RunOutcome::NothingAvailable);
        let exported: Report =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported, Report::empty());
    }

    #[test]
    fn test_export_failure_still_notifies() {
        let notifier = RecordingNotifier::default();
        let mut monitor =
            monitor(sample_days(), &notifier).with_export("/nonexistent/dir/report.json");
        let query = query();

        let outcome = monitor
            .run(&query, &query.criteria(PartOfDay::ANY), "patient@example.com")
            .unwrap();

        assert_eq!(outcome, RunOutcome::Notified { overall_count: 2 });
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_morning_slot_only() {
        let criteria =
            FilterCriteria::new(date(1), date(30)).with_part_of_day(PartOfDay::MORNING);

        let filtered = filter_terms(two_clinic_day(), &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].len(), 1);
        assert_eq!(filtered[0].slots[0].time, at(9, 0));

        let report = aggregate(&filtered);
        assert_eq!(report.overall_count, 1);
        assert_eq!(report.days[0].clinic_groups.len(), 1);
        assert_eq!(report.days[0].clinic_groups[0].clinic_name, "ClinicX");
        assert_eq!(report.days[0].clinic_groups[0].count, 1);
    }

    #[test]
    fn test_morning_slot_message() {
        let (outcome, sent) = run_once(two_clinic_day(), &query(), PartOfDay::MORNING);

        assert_eq!(outcome, RunOutcome::Notified { overall_count: 1 });
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            "Overall number of visits: 1\n\
             \n\
             Date: 10.06.2024\n\
             Visits available in that day: 1\n\
             Number of visits in particular clinics: \n\
             * ClinicX: 1\n\
             \n\
             \n\n--------- REPORT DETAILS ---------\
             \nDate: 10.06.2024\n\
             \nClinic name: ClinicX\n\
             [09:00] DocA\n"
        );
    }

    #[test]
    fn test_unknown_clinic_sends_nothing() {
        let query = query().with_clinic_id(Some(999));

        let filtered = filter_terms(two_clinic_day(), &query.criteria(PartOfDay::ANY));
        assert!(filtered.is_empty());
        assert_eq!(aggregate(&filtered).overall_count, 0);

        let (outcome, sent) = run_once(two_clinic_day(), &query, PartOfDay::ANY);
        assert_eq!(outcome, RunOutcome::NothingAvailable);
        assert!(sent.is_empty());
    }

    #[test]
    fn test_date_bound_drops_earlier_day() {
        let days = vec![
            DayTerms::new(date(10), vec![Slot::new(at(8, 0), "DocA", "ClinicX")]),
            DayTerms::new(date(12), vec![Slot::new(at(8, 0), "DocA", "ClinicX")]),
        ];
        let query = TermQuery::new(5, 4502, date(11), date(12));

        let filtered = filter_terms(days.clone(), &query.criteria(PartOfDay::ANY));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date, date(12));

        let (outcome, sent) = run_once(days, &query, PartOfDay::ANY);
        assert_eq!(outcome, RunOutcome::Notified { overall_count: 1 });
        assert!(!sent[0].contains("10.06.2024"));
    }

    #[test]
    fn test_clinic_groups_follow_first_appearance() {
        let days = vec![DayTerms::new(
            date(10),
            vec![
                Slot::new(at(8, 0), "DocA", "ClinicX"),
                Slot::new(at(9, 0), "DocB", "ClinicY"),
                Slot::new(at(10, 0), "DocC", "ClinicX"),
            ],
        )];
        let query = TermQuery::new(5, 4502, date(10), date(10));

        let report = aggregate(&filter_terms(days.clone(), &query.criteria(PartOfDay::ANY)));
        let summary: Vec<(&str, usize)> = report.days[0]
            .clinic_groups
            .iter()
            .map(|g| (g.clinic_name.as_str(), g.count))
            .collect();
        assert_eq!(summary, vec![("ClinicX", 2), ("ClinicY", 1)]);

        let (outcome, sent) = run_once(days, &query, PartOfDay::ANY);
        assert_eq!(outcome, RunOutcome::Notified { overall_count: 3 });
        assert!(sent[0].contains(
            "\nClinic name: ClinicX\n[08:00] DocA\n[10:00] DocC\n\nClinic name: ClinicY\n[09:00] DocB\n"
        ));
    }

    #[test]
    fn test_source_receives_query() {
        let query = query().with_doctor_id(Some(2));
        let mut source = MemorySource::new(two_clinic_day());

        let days = source.fetch_terms(&query).unwrap();
        let report = aggregate(&filter_terms(days, &query.criteria(PartOfDay::ANY)));

        assert_eq!(source.queries(), &[query]);
        assert_eq!(report.overall_count, 1);
        assert_eq!(report.days[0].clinic_groups[0].slots[0].doctor_name, "DocB");
    }
}
