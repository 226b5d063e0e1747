//! The per-worker processing loop.
//!
//! Each worker repeatedly takes one article from the shared queue, hands it
//! to the fetch/parse collaborator, and folds the resulting word counts into
//! the shared table. A worker exits for exactly two reasons: cancellation
//! ([`WorkerExit::Stopped`]) or queue exhaustion ([`WorkerExit::Finished`]).
//! No error from a single article ever unwinds past the loop; a failed
//! article is reported as a warning and dropped, never retried.

use crate::models::{ArticleHeader, LocalFrequency};
use crate::pool::cancel::StopSignal;
use crate::pool::queue::TaskQueue;
use crate::pool::reporter::{ReportKind, Reporter};
use crate::pool::stats::SharedWordStats;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, instrument};

/// The fetch/parse collaborator, seen from the worker's side.
///
/// Implementations must be safe to call concurrently from multiple workers
/// with independent arguments; an `Err` means "no result for this article"
/// and nothing more.
#[async_trait]
pub trait ArticleProcessor: Send + Sync {
    /// Fetch and analyze one article, returning its word counts.
    async fn process(
        &self,
        article: &ArticleHeader,
    ) -> Result<LocalFrequency, Box<dyn std::error::Error + Send + Sync>>;
}

/// Why a worker's loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// The queue was drained; all reachable work is done.
    Finished,
    /// Cancellation was observed before the next dequeue.
    Stopped,
}

/// Shared processed/failed tallies across all workers of one run.
#[derive(Debug, Default)]
pub struct RunCounters {
    processed: AtomicUsize,
    failed: AtomicUsize,
}

impl RunCounters {
    /// Articles successfully processed and merged so far.
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    /// Articles dropped after a fetch/parse failure so far.
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }
}

/// Everything one worker needs, fixed at spawn time.
///
/// Workers share the queue, table, stop signal, counters, and processor;
/// only `id` differs between them.
#[derive(Clone)]
pub struct WorkerContext {
    /// This worker's index, used in reports only.
    pub id: usize,
    /// Shared queue of pending articles.
    pub queue: Arc<TaskQueue>,
    /// Shared aggregation table.
    pub stats: Arc<SharedWordStats>,
    /// Shared cancellation signal.
    pub stop: Arc<StopSignal>,
    /// Shared run tallies.
    pub counters: Arc<RunCounters>,
    /// Report event sink.
    pub reporter: Reporter,
    /// Fetch/parse collaborator.
    pub processor: Arc<dyn ArticleProcessor>,
}

/// Drive one worker until the queue is empty or cancellation is observed.
#[instrument(level = "debug", skip_all, fields(worker = ctx.id))]
pub async fn run(ctx: WorkerContext) -> WorkerExit {
    ctx.reporter.info(format!("Worker {}: started", ctx.id));

    let exit = loop {
        if ctx.stop.is_stopped() {
            break WorkerExit::Stopped;
        }

        let Some(article) = ctx.queue.try_take() else {
            break WorkerExit::Finished;
        };

        ctx.reporter.info(format!(
            "Worker {}: fetching \"{}\"",
            ctx.id, article.title
        ));
        debug!(url = %article.url, "Processing article");

        match ctx.processor.process(&article).await {
            Ok(local) => {
                ctx.reporter.report(
                    ReportKind::Trace,
                    format!("Worker {}: merging stats for \"{}\"", ctx.id, article.title),
                );
                ctx.stats.merge(&local, &article.url);
                ctx.counters.processed.fetch_add(1, Ordering::SeqCst);
                ctx.reporter.info(format!(
                    "Worker {}: merged \"{}\" ({} processed, {} failed so far)",
                    ctx.id,
                    article.title,
                    ctx.counters.processed(),
                    ctx.counters.failed()
                ));
            }
            Err(e) => {
                ctx.counters.failed.fetch_add(1, Ordering::SeqCst);
                ctx.reporter.warning(format!(
                    "Worker {}: failed to process \"{}\" ({}); dropping article ({} processed, {} failed so far)",
                    ctx.id,
                    article.title,
                    e,
                    ctx.counters.processed(),
                    ctx.counters.failed()
                ));
            }
        }
    };

    match exit {
        WorkerExit::Finished => ctx.reporter.info(format!("Worker {}: finished", ctx.id)),
        WorkerExit::Stopped => ctx
            .reporter
            .warning(format!("Worker {}: stopped", ctx.id)),
    }
    exit
}
