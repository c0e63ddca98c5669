//! Work item builder
//!
//! Runs extraction and synthesis for every project record concurrently, one
//! task per record, and joins them all before returning. Records never wait
//! on each other; the only shared state is the diagnostic sink.

use helix_core::domain::diagnostic::{Diagnostic, DiagnosticKind};
use helix_core::domain::project::ProjectRecord;
use helix_core::domain::settings::GlobalSettings;
use helix_core::domain::work_item::WorkItem;
use std::sync::Arc;
use tracing::{debug, info};

use crate::diagnostics::{DiagnosticSink, InMemoryDiagnostics};
use crate::extractor::extract;
use crate::synthesizer::synthesize;

/// Result of one builder run
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Work items for every valid record
    pub work_items: Vec<WorkItem>,

    /// Everything reported during the run
    pub diagnostics: Vec<Diagnostic>,

    /// False when at least one error was reported
    pub success: bool,
}

impl BuildOutcome {
    /// Sorts work items by name for consumers needing a stable order
    pub fn sort_by_name(&mut self) {
        self.work_items.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

/// Builds work items from project records
pub struct WorkItemBuilder {
    settings: Arc<GlobalSettings>,
}

impl WorkItemBuilder {
    /// Creates a builder applying the given settings to every record
    pub fn new(settings: GlobalSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Builds work items, collecting diagnostics in a fresh in-memory sink
    pub async fn build(&self, records: Vec<ProjectRecord>) -> BuildOutcome {
        let sink = Arc::new(InMemoryDiagnostics::new());
        let shared: Arc<dyn DiagnosticSink> = sink.clone();
        let work_items = self.build_with_sink(records, shared).await;

        BuildOutcome {
            work_items,
            diagnostics: sink.diagnostics(),
            success: !sink.has_errors(),
        }
    }

    /// Builds work items, reporting into the given sink
    ///
    /// Invalid records are dropped from the result. Callers decide success by
    /// asking the sink for errors.
    pub async fn build_with_sink(
        &self,
        records: Vec<ProjectRecord>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Vec<WorkItem> {
        let total = records.len();
        debug!("Building work items for {} project(s)", total);

        let handles: Vec<_> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let label = record.label(index);
                let handle = self.spawn_record_task(index, record, Arc::clone(&sink));
                (label, handle)
            })
            .collect();

        let mut work_items = Vec::with_capacity(total);
        for (label, handle) in handles {
            match handle.await {
                Ok(Some(work_item)) => work_items.push(work_item),
                Ok(None) => debug!("Skipped {}", label),
                Err(e) => sink.log(DiagnosticKind::TaskFailed {
                    record: label,
                    reason: e.to_string(),
                }),
            }
        }

        info!(
            "Created {} work item(s) from {} project(s)",
            work_items.len(),
            total
        );

        work_items
    }

    /// Spawns the task processing a single record
    fn spawn_record_task(
        &self,
        index: usize,
        record: ProjectRecord,
        sink: Arc<dyn DiagnosticSink>,
    ) -> tokio::task::JoinHandle<Option<WorkItem>> {
        let settings = Arc::clone(&self.settings);

        tokio::spawn(async move {
            let project = extract(&record, index, sink.as_ref())?;
            Some(synthesize(&project, &settings, sink.as_ref()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helix_core::domain::diagnostic::DiagnosticLevel;
    use helix_core::domain::project::MetadataField;
    use helix_core::domain::work_item::DEFAULT_TIMEOUT;
    use std::time::Duration;

    fn record(name: &str) -> ProjectRecord {
        ProjectRecord {
            identity: Some(format!("tests/{name}/{name}.csproj")),
            publish_directory: Some(format!("/out/{name}")),
            target_path: Some(format!("/out/{name}/{name}.dll")),
            runtime_target_framework: Some("net6.0".to_string()),
            arguments: None,
            work_item_name: None,
            work_item_name_prefix: None,
        }
    }

    fn sorted(mut items: Vec<WorkItem>) -> Vec<WorkItem> {
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    #[tokio::test]
    async fn test_reference_example() {
        let record = ProjectRecord {
            identity: None,
            publish_directory: Some("/out/a".to_string()),
            target_path: Some("/out/a/Tests.dll".to_string()),
            runtime_target_framework: Some("net6.0".to_string()),
            arguments: Some("--filter X".to_string()),
            work_item_name: None,
            work_item_name_prefix: None,
        };
        let builder = WorkItemBuilder::new(GlobalSettings::new(true).with_arguments("--blame"));

        let outcome = builder.build(vec![record]).await;

        assert!(outcome.success);
        assert_eq!(
            outcome.work_items,
            vec![WorkItem {
                name: "Tests.dll".to_string(),
                payload_directory: "/out/a".to_string(),
                command: "dotnet test Tests.dll --blame --logger \"trx;LogFileName=${HELIX_WORKITEM_ROOT}/testResults.trx\" --filter X".to_string(),
                timeout: Duration::from_secs(300),
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_target_path_fails_run() {
        let mut broken = record("a");
        broken.target_path = None;
        let builder = WorkItemBuilder::new(GlobalSettings::new(true));

        let outcome = builder.build(vec![broken]).await;

        assert!(outcome.work_items.is_empty());
        assert!(!outcome.success);
        let errors: Vec<_> = outcome.errors().collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0].kind,
            DiagnosticKind::MissingRequiredField { field: MetadataField::TargetPath, record }
                if record == "tests/a/a.csproj"
        ));
    }

    #[tokio::test]
    async fn test_invalid_record_does_not_stop_siblings() {
        let mut broken = record("b");
        broken.publish_directory = None;
        broken.runtime_target_framework = Some(String::new());
        let builder = WorkItemBuilder::new(GlobalSettings::new(false));

        let outcome = builder
            .build(vec![record("a"), broken, record("c")])
            .await;

        let names: Vec<_> = sorted(outcome.work_items.clone())
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["a.dll", "c.dll"]);
        assert_eq!(outcome.errors().count(), 2);
        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn test_invalid_timeout_only_warns() {
        let builder =
            WorkItemBuilder::new(GlobalSettings::new(true).with_timeout("not-a-duration"));

        let outcome = builder.build(vec![record("a")]).await;

        assert!(outcome.success);
        assert_eq!(outcome.work_items.len(), 1);
        assert_eq!(outcome.work_items[0].timeout, DEFAULT_TIMEOUT);
        let warnings = outcome
            .diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count();
        assert_eq!(warnings, 1);
    }

    #[tokio::test]
    async fn test_valid_timeout_applies_to_all() {
        let builder = WorkItemBuilder::new(GlobalSettings::new(true).with_timeout("00:20:00"));

        let outcome = builder.build(vec![record("a"), record("b")]).await;

        assert!(
            outcome
                .work_items
                .iter()
                .all(|w| w.timeout == Duration::from_secs(1200))
        );
    }

    #[tokio::test]
    async fn test_idempotent() {
        let records: Vec<_> = ["a", "b", "c", "d"].into_iter().map(record).collect();
        let builder = WorkItemBuilder::new(GlobalSettings::new(true).with_arguments("--blame"));

        let first = builder.build(records.clone()).await;
        let second = builder.build(records).await;

        assert_eq!(sorted(first.work_items), sorted(second.work_items));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_records_concurrently() {
        let records: Vec<_> = (0..64)
            .map(|i| {
                let mut r = record(&format!("p{i}"));
                if i % 8 == 0 {
                    r.target_path = None;
                }
                r
            })
            .collect();
        let builder = WorkItemBuilder::new(GlobalSettings::new(true));

        let outcome = builder.build(records).await;

        assert_eq!(outcome.work_items.len(), 56);
        assert_eq!(outcome.errors().count(), 8);
    }

    /// Sink that panics while reporting the creation of one assembly
    struct PanickingSink {
        inner: InMemoryDiagnostics,
        assembly: &'static str,
    }

    impl DiagnosticSink for PanickingSink {
        fn report(&self, diagnostic: Diagnostic) {
            if let DiagnosticKind::WorkItemCreated { identity, .. } = &diagnostic.kind {
                if identity == self.assembly {
                    panic!("sink failure for {}", identity);
                }
            }
            self.inner.report(diagnostic);
        }

        fn diagnostics(&self) -> Vec<Diagnostic> {
            self.inner.diagnostics()
        }
    }

    #[tokio::test]
    async fn test_panicking_task_is_reported_and_siblings_finish() {
        let sink = Arc::new(PanickingSink {
            inner: InMemoryDiagnostics::new(),
            assembly: "broken.dll",
        });
        let shared: Arc<dyn DiagnosticSink> = sink.clone();
        let builder = WorkItemBuilder::new(GlobalSettings::new(true));

        let work_items = builder
            .build_with_sink(vec![record("a"), record("broken"), record("c")], shared)
            .await;

        let names: Vec<_> = sorted(work_items).into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["a.dll", "c.dll"]);
        assert!(sink.has_errors());

        let failures: Vec<_> = sink
            .diagnostics()
            .into_iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::TaskFailed { .. }))
            .collect();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].is_error());
        assert!(matches!(
            &failures[0].kind,
            DiagnosticKind::TaskFailed { record, .. } if record == "tests/broken/broken.csproj"
        ));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let builder = WorkItemBuilder::new(GlobalSettings::default());

        let outcome = builder.build(Vec::new()).await;

        assert!(outcome.success);
        assert!(outcome.work_items.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_sort_by_name() {
        let builder = WorkItemBuilder::new(GlobalSettings::new(true));
        let mut outcome = builder
            .build(vec![record("c"), record("a"), record("b")])
            .await;

        outcome.sort_by_name();

        let names: Vec<_> = outcome.work_items.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["a.dll", "b.dll", "c.dll"]);
    }
}
