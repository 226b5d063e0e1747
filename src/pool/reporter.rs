//! Serialized progress and diagnostic reporting for concurrent workers.
//!
//! Workers produce human-readable messages concurrently; printing them
//! directly would interleave multi-line output character-by-character. The
//! reporter instead pushes `(kind, message)` events onto an unbounded
//! channel consumed by a single printer task, so every message is emitted
//! whole without any lock. Sending never blocks the worker beyond the
//! channel push.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Severity/purpose of one report event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Fine-grained progress detail.
    Trace,
    /// Normal progress milestones.
    Info,
    /// Recovered problems, such as a dropped article.
    Warning,
    /// Unrecoverable problems.
    Error,
    /// Final query/aggregation results.
    Result,
}

/// One report event as carried on the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// What kind of message this is.
    pub kind: ReportKind,
    /// The full, already-formatted message text.
    pub message: String,
}

/// Clonable sending half handed to every worker and to the orchestrator.
#[derive(Debug, Clone)]
pub struct Reporter {
    tx: mpsc::UnboundedSender<Report>,
}

impl Reporter {
    /// Emit one report event.
    ///
    /// If the consumer side is gone the event is silently dropped; reporting
    /// is best-effort and must never fail a worker.
    pub fn report(&self, kind: ReportKind, message: impl Into<String>) {
        let _ = self.tx.send(Report {
            kind,
            message: message.into(),
        });
    }

    /// Emit an info-level event.
    pub fn info(&self, message: impl Into<String>) {
        self.report(ReportKind::Info, message);
    }

    /// Emit a [`ReportKind::Warning`] event.
    pub fn warning(&self, message: impl Into<String>) {
        self.report(ReportKind::Warning, message);
    }

    /// Emit a [`ReportKind::Result`] event.
    pub fn result(&self, message: impl Into<String>) {
        self.report(ReportKind::Result, message);
    }
}

/// Create a connected reporter/receiver pair.
///
/// The receiver is the subscribable stream of report events; hand it to
/// [`spawn_printer`] or consume it directly.
pub fn channel() -> (Reporter, mpsc::UnboundedReceiver<Report>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Reporter { tx }, rx)
}

/// Spawn the single printer task that drains the report stream.
///
/// Maps report kinds onto tracing levels; `Result` events are logged at
/// info with a marker field so final figures stand out from progress chatter.
/// The task ends when every [`Reporter`] clone has been dropped.
pub fn spawn_printer(mut rx: mpsc::UnboundedReceiver<Report>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(report) = rx.recv().await {
            match report.kind {
                ReportKind::Trace => debug!("{}", report.message),
                ReportKind::Info => info!("{}", report.message),
                ReportKind::Warning => warn!("{}", report.message),
                ReportKind::Error => error!("{}", report.message),
                ReportKind::Result => info!(result = true, "{}", report.message),
            }
        }
    })
}
