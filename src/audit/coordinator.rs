//! Audit coordinator - orchestrates the concurrent group-tree walk
//!
//! Each discovered subgroup becomes an independent task: the dispatch loop
//! pulls it off the queue, gates it on the semaphore, and spawns its
//! collector. The collector drains the group's own members, every project's
//! members, and the subgroup listing, which feeds back into the queue. An
//! in-flight counter tracks outstanding work so the run only completes
//! after the whole tree has been drained.
//!
//! The first fetch failure flips the shutdown flag and aborts the run
//! without waiting for already-dispatched tasks to finish; the report is
//! either complete or the run is declared failed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error, info};

use crate::api::MembershipApi;
use crate::audit::filter::FilterChain;
use crate::audit::record::{normalize, Container};
use crate::config::AuditConfig;
use crate::error::{ApiError, AuditError, Result};
use crate::gitlab::types::Group;
use crate::pagination::drain_pages;
use crate::report::ReportSink;

/// Counters collected during the walk
#[derive(Debug, Default)]
pub struct AuditStats {
    pub groups_visited: AtomicU64,
    pub projects_visited: AtomicU64,
    pub members_seen: AtomicU64,
    pub records_reported: AtomicU64,
}

impl AuditStats {
    pub fn record_group(&self) {
        self.groups_visited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_project(&self) {
        self.projects_visited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_member(&self) {
        self.members_seen.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reported(&self) {
        self.records_reported.fetch_add(1, Ordering::Relaxed);
    }
}

/// Result of a completed audit run
#[derive(Debug)]
pub struct AuditResult {
    pub groups_visited: u64,
    pub projects_visited: u64,
    pub members_seen: u64,
    pub records_reported: u64,
    pub duration: Duration,
}

/// A queued unit of traversal work
#[derive(Debug)]
struct GroupTask {
    group: Group,
}

/// Coordinator for the concurrent audit walk
pub struct AuditCoordinator<A, S> {
    api: Arc<A>,
    filters: Arc<FilterChain>,
    sink: Arc<S>,
    config: Arc<AuditConfig>,
    shutdown: Arc<AtomicBool>,
    stats: Arc<AuditStats>,
}

impl<A, S> AuditCoordinator<A, S>
where
    A: MembershipApi + 'static,
    S: ReportSink + 'static,
{
    /// Create a new coordinator
    pub fn new(api: Arc<A>, filters: FilterChain, sink: Arc<S>, config: AuditConfig) -> Self {
        Self {
            api,
            filters: Arc::new(filters),
            sink,
            config: Arc::new(config),
            shutdown: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(AuditStats::default()),
        }
    }

    /// Shared stats handle for progress reporting
    pub fn stats(&self) -> Arc<AuditStats> {
        Arc::clone(&self.stats)
    }

    /// Run the audit walk from the root group (numeric id or full path)
    pub async fn run(self, root: &str) -> Result<AuditResult> {
        let start_time = Instant::now();

        let root_group = self.api.get_group(root).await?;

        info!(
            group = %root_group.full_path,
            id = root_group.id,
            concurrency = self.config.concurrency,
            "Starting audit walk"
        );

        // Work queue for discovered subgroups
        let (task_tx, mut task_rx) = mpsc::channel::<GroupTask>(self.config.queue_size);

        // Admission gate: caps simultaneously walked groups
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));

        // Outstanding work, incremented before dispatch
        let in_flight = Arc::new(AtomicU64::new(0));

        // First fetch failure recorded here; later ones are dropped
        let failure: Arc<Mutex<Option<ApiError>>> = Arc::new(Mutex::new(None));

        in_flight.fetch_add(1, Ordering::SeqCst);
        task_tx
            .send(GroupTask { group: root_group })
            .await
            .map_err(|_| AuditError::QueueClosed)?;

        // Dispatch loop: stops once the queue is quiet and nothing is in
        // flight, or as soon as a collector records a failure.
        while !self.shutdown.load(Ordering::Relaxed) {
            let task = match tokio::time::timeout(Duration::from_millis(50), task_rx.recv()).await
            {
                Ok(Some(task)) => task,
                Ok(None) => break,
                Err(_) => {
                    if in_flight.load(Ordering::SeqCst) == 0 {
                        break;
                    }
                    continue;
                }
            };

            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore closed unexpectedly");

            let api = Arc::clone(&self.api);
            let filters = Arc::clone(&self.filters);
            let sink = Arc::clone(&self.sink);
            let stats = Arc::clone(&self.stats);
            let page_size = self.config.page_size;
            let tx = task_tx.clone();
            let in_flight_task = Arc::clone(&in_flight);
            let failure_task = Arc::clone(&failure);
            let shutdown = Arc::clone(&self.shutdown);

            tokio::spawn(async move {
                let result = process_group(
                    api.as_ref(),
                    &filters,
                    sink.as_ref(),
                    &stats,
                    page_size,
                    &task.group,
                )
                .await;

                match result {
                    Ok(subgroups) => {
                        for subgroup in subgroups {
                            in_flight_task.fetch_add(1, Ordering::SeqCst);
                            if tx.send(GroupTask { group: subgroup }).await.is_err() {
                                in_flight_task.fetch_sub(1, Ordering::SeqCst);
                            }
                        }
                    }
                    Err(e) => {
                        error!(group = %task.group.full_path, error = %e, "Group walk failed");
                        let mut slot = failure_task.lock().expect("failure slot poisoned");
                        if slot.is_none() {
                            *slot = Some(e);
                        }
                        shutdown.store(true, Ordering::SeqCst);
                    }
                }

                in_flight_task.fetch_sub(1, Ordering::SeqCst);
                drop(permit);
            });
        }

        // A recorded failure aborts the run without draining dispatched work
        if let Some(err) = failure.lock().expect("failure slot poisoned").take() {
            return Err(AuditError::Api(err));
        }

        // Wait for all in-flight groups to complete
        debug!("Waiting for in-flight groups to complete");
        while in_flight.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        // Wait for the semaphore to be fully available (all tasks done)
        let _ = semaphore
            .acquire_many(self.config.concurrency as u32)
            .await;

        let duration = start_time.elapsed();
        let result = AuditResult {
            groups_visited: self.stats.groups_visited.load(Ordering::Relaxed),
            projects_visited: self.stats.projects_visited.load(Ordering::Relaxed),
            members_seen: self.stats.members_seen.load(Ordering::Relaxed),
            records_reported: self.stats.records_reported.load(Ordering::Relaxed),
            duration,
        };

        info!(
            groups = result.groups_visited,
            projects = result.projects_visited,
            members = result.members_seen,
            reported = result.records_reported,
            duration_secs = duration.as_secs_f64(),
            "Audit walk completed"
        );

        Ok(result)
    }
}

/// Process one group: its own members, every project's members, and the
/// subgroup listing the dispatch loop recurses into.
///
/// Projects are leaves; their members are drained here and they are never
/// queued. Any pagination error aborts this group and propagates.
async fn process_group<A, S>(
    api: &A,
    filters: &FilterChain,
    sink: &S,
    stats: &AuditStats,
    page_size: u32,
    group: &Group,
) -> std::result::Result<Vec<Group>, ApiError>
where
    A: MembershipApi,
    S: ReportSink,
{
    let members = drain_pages(|page| api.list_group_members(group.id, page, page_size)).await?;
    for member in &members {
        stats.record_member();
        let record = normalize(Container::Group(group), member);
        if filters.accepts(&record) {
            sink.report(&record);
            stats.record_reported();
        }
    }

    let projects = drain_pages(|page| api.list_group_projects(group.id, page, page_size)).await?;
    for project in &projects {
        stats.record_project();

        let project_members =
            drain_pages(|page| api.list_project_members(project.id, page, page_size)).await?;
        for member in &project_members {
            stats.record_member();
            let record = normalize(Container::Project(project), member);
            if filters.accepts(&record) {
                sink.report(&record);
                stats.record_reported();
            }
        }
    }

    let subgroups = drain_pages(|page| api.list_subgroups(group.id, page, page_size)).await?;

    stats.record_group();
    debug!(
        group = %group.full_path,
        members = members.len(),
        projects = projects.len(),
        subgroups = subgroups.len(),
        "Group processed"
    );

    Ok(subgroups)
}
