//! The concurrent fan-out/fan-in engine.
//!
//! A fixed-size pool of workers drains one shared [`queue::TaskQueue`] and
//! folds per-article word counts into one shared [`stats::SharedWordStats`]
//! table. The orchestrator owns the run lifecycle: it populates the queue,
//! spawns the workers, joins them all at a single completion point, and only
//! then releases the finished table. No partial results are ever exposed
//! mid-run.
//!
//! # Submodules
//!
//! - [`queue`]: thread-safe FIFO of pending articles
//! - [`stats`]: shared aggregation table and the atomic merge step
//! - [`cancel`]: cooperative stop signal
//! - [`reporter`]: serialized report stream for concurrent workers
//! - [`worker`]: the per-worker processing loop

pub mod cancel;
pub mod queue;
pub mod reporter;
pub mod stats;
pub mod worker;

use crate::models::{ArticleHeader, WordStatsTable};
use cancel::StopSignal;
use futures::future::join_all;
use queue::TaskQueue;
use reporter::Reporter;
use stats::SharedWordStats;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::task::JoinHandle;
use tracing::{info, instrument};
use worker::{ArticleProcessor, RunCounters, WorkerContext, WorkerExit};

/// Everything a finished run hands downstream.
#[derive(Debug)]
pub struct CrawlSummary {
    /// The completed aggregation table; read-only from here on.
    pub stats: WordStatsTable,
    /// Articles successfully processed and merged.
    pub processed: usize,
    /// Articles dropped after fetch/parse failures.
    pub failed: usize,
    /// Whether the run ended by stop request rather than queue exhaustion.
    pub stopped: bool,
    /// Terminal state of each worker, by worker index.
    pub worker_exits: Vec<WorkerExit>,
}

/// Control surface of a running pool.
///
/// Obtained from [`start`]; lets the caller request a cooperative stop,
/// poll for completion, and finally collect the [`CrawlSummary`].
#[derive(Debug)]
pub struct PoolHandle {
    stop: Arc<StopSignal>,
    done: Arc<AtomicBool>,
    join: JoinHandle<CrawlSummary>,
}

impl PoolHandle {
    /// Request that all workers stop before their next article.
    ///
    /// Does not interrupt an article already in flight; that fetch completes
    /// or fails on its own and its result is still merged.
    pub fn request_stop(&self) {
        self.stop.request_stop();
    }

    /// A shareable handle to the stop signal, for wiring external stop
    /// requests (such as Ctrl-C) that outlive this handle.
    pub fn stop_signal(&self) -> Arc<StopSignal> {
        Arc::clone(&self.stop)
    }

    /// Whether every worker has exited and the summary is ready.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    /// Block until every worker has exited, then take the summary.
    pub async fn wait(self) -> CrawlSummary {
        self.join.await.expect("pool orchestrator task panicked")
    }
}

/// Spawn a worker pool over the discovered articles.
///
/// Populates the queue from `items` before any worker starts, then spawns
/// exactly `worker_count` workers (minimum one) bound to the same queue,
/// table, stop signal, and reporter.
///
/// An empty `items` sequence is not an error: the run completes trivially
/// with an empty table and every worker reporting "finished".
///
/// # Arguments
///
/// * `items` - Ordered articles from the front-page discovery step
/// * `worker_count` - Fixed pool size
/// * `processor` - The fetch/parse collaborator shared by all workers
/// * `reporter` - Sink for progress/diagnostic events
#[instrument(level = "info", skip_all, fields(items = items.len(), workers = worker_count))]
pub fn start(
    items: Vec<ArticleHeader>,
    worker_count: usize,
    processor: Arc<dyn ArticleProcessor>,
    reporter: Reporter,
) -> PoolHandle {
    let worker_count = worker_count.max(1);
    if items.is_empty() {
        reporter.warning("No articles to process; the run will complete empty");
    }

    let queue = Arc::new(TaskQueue::from_items(items));
    let stats = Arc::new(SharedWordStats::new());
    let stop = Arc::new(StopSignal::new());
    let counters = Arc::new(RunCounters::default());
    let done = Arc::new(AtomicBool::new(false));

    let join = tokio::spawn(orchestrate(
        queue,
        stats,
        Arc::clone(&stop),
        counters,
        Arc::clone(&done),
        worker_count,
        processor,
        reporter,
    ));

    PoolHandle { stop, done, join }
}

/// Run the pool to completion: spawn workers, join them all, then collect
/// the finished table.
#[allow(clippy::too_many_arguments)]
async fn orchestrate(
    queue: Arc<TaskQueue>,
    stats: Arc<SharedWordStats>,
    stop: Arc<StopSignal>,
    counters: Arc<RunCounters>,
    done: Arc<AtomicBool>,
    worker_count: usize,
    processor: Arc<dyn ArticleProcessor>,
    reporter: Reporter,
) -> CrawlSummary {
    let handles: Vec<JoinHandle<WorkerExit>> = (0..worker_count)
        .map(|id| {
            let ctx = WorkerContext {
                id,
                queue: Arc::clone(&queue),
                stats: Arc::clone(&stats),
                stop: Arc::clone(&stop),
                counters: Arc::clone(&counters),
                reporter: reporter.clone(),
                processor: Arc::clone(&processor),
            };
            tokio::spawn(worker::run(ctx))
        })
        .collect();

    // The single "all complete" point; the table stays sealed until every
    // worker has exited.
    let worker_exits: Vec<WorkerExit> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("worker task panicked"))
        .collect();

    let stopped = stop.is_stopped();
    let processed = counters.processed();
    let failed = counters.failed();

    let stats = Arc::into_inner(stats)
        .expect("stats table still shared after all workers joined")
        .into_table();

    reporter.info(format!(
        "Crawl {}: {} processed, {} failed, {} distinct words",
        if stopped { "stopped early" } else { "finished" },
        processed,
        failed,
        stats.len()
    ));
    info!(processed, failed, stopped, words = stats.len(), "Pool run complete");

    done.store(true, Ordering::SeqCst);
    CrawlSummary {
        stats,
        processed,
        failed,
        stopped,
        worker_exits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocalFrequency;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Notify;

    fn header(url: &str) -> ArticleHeader {
        ArticleHeader {
            url: url.to_string(),
            title: url.to_string(),
            byline: None,
            summary: None,
        }
    }

    fn sink() -> Reporter {
        let (rep, rx) = reporter::channel();
        drop(rx);
        rep
    }

    /// Yields a frequency scripted per URL; unknown URLs fail.
    struct ScriptedProcessor {
        scripts: HashMap<String, LocalFrequency>,
    }

    #[async_trait]
    impl ArticleProcessor for ScriptedProcessor {
        async fn process(
            &self,
            article: &ArticleHeader,
        ) -> Result<LocalFrequency, Box<dyn std::error::Error + Send + Sync>> {
            self.scripts
                .get(&article.url)
                .cloned()
                .ok_or_else(|| "no script for this article".into())
        }
    }

    fn scripted(entries: &[(&str, &[(&str, u64)])]) -> Arc<ScriptedProcessor> {
        let scripts = entries
            .iter()
            .map(|(url, words)| {
                (
                    url.to_string(),
                    words
                        .iter()
                        .map(|(w, c)| (w.to_string(), *c))
                        .collect::<LocalFrequency>(),
                )
            })
            .collect();
        Arc::new(ScriptedProcessor { scripts })
    }

    #[tokio::test]
    async fn test_empty_input_completes_trivially() {
        let handle = start(vec![], 3, scripted(&[]), sink());
        let summary = handle.wait().await;
        assert!(summary.stats.is_empty());
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.failed, 0);
        assert!(!summary.stopped);
        assert_eq!(summary.worker_exits, vec![WorkerExit::Finished; 3]);
    }

    #[tokio::test]
    async fn test_every_item_processed_exactly_once() {
        for worker_count in 1..=4 {
            let items: Vec<_> = (0..20).map(|n| header(&format!("u{n}"))).collect();
            let scripts: Vec<(String, Vec<(&str, u64)>)> = (0..20)
                .map(|n| (format!("u{n}"), vec![("common", 1)]))
                .collect();
            let script_refs: Vec<(&str, &[(&str, u64)])> = scripts
                .iter()
                .map(|(u, w)| (u.as_str(), w.as_slice()))
                .collect();

            let handle = start(items, worker_count, scripted(&script_refs), sink());
            let summary = handle.wait().await;
            assert_eq!(summary.processed, 20, "worker_count={worker_count}");
            assert_eq!(summary.stats["common"].count, 20);
            assert_eq!(summary.stats["common"].articles.len(), 20);
        }
    }

    #[tokio::test]
    async fn test_concrete_three_article_scenario_with_two_workers() {
        let processor = scripted(&[
            ("item1", &[("a", 2), ("b", 1)]),
            ("item2", &[("b", 1), ("c", 1)]),
            ("item3", &[("a", 1)]),
        ]);
        let items = vec![header("item1"), header("item2"), header("item3")];

        let handle = start(items, 2, processor, sink());
        let summary = handle.wait().await;

        assert_eq!(summary.stats["a"].count, 3);
        assert_eq!(
            summary.stats["a"].articles.iter().collect::<Vec<_>>(),
            vec!["item1", "item3"]
        );
        assert_eq!(summary.stats["b"].count, 2);
        assert_eq!(
            summary.stats["b"].articles.iter().collect::<Vec<_>>(),
            vec!["item1", "item2"]
        );
        assert_eq!(summary.stats["c"].count, 1);
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_fatal() {
        let processor = scripted(&[("good", &[("w", 1)])]);
        let items = vec![header("good"), header("bad-1"), header("bad-2")];

        let summary = start(items, 2, processor, sink()).wait().await;
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.failed, 2);
        assert!(!summary.stopped);
        assert_eq!(summary.stats["w"].count, 1);
    }

    #[tokio::test]
    async fn test_stop_before_any_work_starts_nothing() {
        /// Blocks every article until allowed, so the test can stop the pool
        /// while the queue is still full.
        struct GatedProcessor {
            gate: Arc<Notify>,
        }

        #[async_trait]
        impl ArticleProcessor for GatedProcessor {
            async fn process(
                &self,
                _article: &ArticleHeader,
            ) -> Result<LocalFrequency, Box<dyn std::error::Error + Send + Sync>> {
                self.gate.notified().await;
                Ok(HashMap::from([("gated".to_string(), 1u64)]))
            }
        }

        let gate = Arc::new(Notify::new());
        let items: Vec<_> = (0..10).map(|n| header(&format!("u{n}"))).collect();
        let handle = start(
            items,
            2,
            Arc::new(GatedProcessor {
                gate: Arc::clone(&gate),
            }),
            sink(),
        );

        assert!(!handle.is_done());
        handle.request_stop();
        // Release the (at most two) articles already in flight; workers must
        // observe the stop before dequeuing anything new.
        gate.notify_waiters();
        gate.notify_waiters();
        let summary = handle.wait().await;

        assert!(summary.stopped);
        assert!(summary.worker_exits.contains(&WorkerExit::Stopped));
        // In-flight items may finish and merge; nothing beyond them starts.
        assert!(summary.processed <= 2);
    }

    #[tokio::test]
    async fn test_stop_with_single_worker_leaves_queue_untouched_after_inflight() {
        /// Requests a stop from inside the first article's processing, so
        /// with one worker the outcome is deterministic.
        struct SelfStoppingProcessor {
            stop: std::sync::Mutex<Option<Arc<StopSignal>>>,
        }

        #[async_trait]
        impl ArticleProcessor for SelfStoppingProcessor {
            async fn process(
                &self,
                _article: &ArticleHeader,
            ) -> Result<LocalFrequency, Box<dyn std::error::Error + Send + Sync>> {
                if let Some(stop) = self.stop.lock().unwrap().take() {
                    stop.request_stop();
                }
                Ok(HashMap::from([("only".to_string(), 1u64)]))
            }
        }

        let items = vec![header("u0"), header("u1"), header("u2")];
        let processor = Arc::new(SelfStoppingProcessor {
            stop: std::sync::Mutex::new(None),
        });
        let handle = start(
            items,
            1,
            Arc::clone(&processor) as Arc<dyn ArticleProcessor>,
            sink(),
        );
        *processor.stop.lock().unwrap() = Some(Arc::clone(&handle.stop));

        let summary = handle.wait().await;
        // The first article finished and merged; no new articles started.
        assert!(summary.stopped);
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.stats["only"].count, 1);
        assert_eq!(summary.worker_exits, vec![WorkerExit::Stopped]);
    }

    #[tokio::test]
    async fn test_is_done_transitions_after_completion() {
        let processor = scripted(&[("u0", &[("w", 1)])]);
        let handle = start(vec![header("u0")], 1, processor, sink());
        // Nothing has run yet on the test runtime, so the pool cannot be done.
        assert!(!handle.is_done());
        let summary = handle.wait().await;
        assert_eq!(summary.processed, 1);
    }

    #[tokio::test]
    async fn test_zero_worker_count_is_clamped_to_one() {
        let processor = scripted(&[("u0", &[("w", 1)])]);
        let summary = start(vec![header("u0")], 0, processor, sink()).wait().await;
        assert_eq!(summary.worker_exits.len(), 1);
        assert_eq!(summary.processed, 1);
    }
}
