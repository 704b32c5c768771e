//! Owned dashboard state and its read view.

use std::time::Instant;

use chrono::{DateTime, Local};

use crate::coordinator::merge::MergeOutcome;
use crate::models::{CorrelationSeries, DailySeries, RealtimeQuote, StatsSnapshot};

/// Per-resource slot: current value, loading flag, error message and the
/// last successful fetch time. Mutation happens only through the methods
/// below, all called by the coordinator.
#[derive(Debug)]
pub struct ResourceState<T> {
    value: Option<T>,
    loading: bool,
    error: Option<String>,
    last_fetch: Option<Instant>,
}

impl<T> ResourceState<T> {
    pub fn new() -> Self {
        ResourceState {
            value: None,
            loading: false,
            error: None,
            last_fetch: None,
        }
    }

    /// Marks the start of a fetch attempt: loading on, previous error
    /// cleared. Value and timestamp are untouched.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Stores a successful result. This is the only place the freshness
    /// timestamp advances.
    pub fn store(&mut self, value: T, now: Instant) {
        self.value = Some(value);
        self.last_fetch = Some(now);
    }

    /// Records a failed attempt. The previous value and timestamp stay as
    /// they were (stale-but-valid).
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_fetch(&self) -> Option<Instant> {
        self.last_fetch
    }
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ResourceState<T> {
    pub fn view(&self) -> ResourceView<T> {
        ResourceView {
            value: self.value.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub stats: ResourceState<StatsSnapshot>,
    pub daily: ResourceState<DailySeries>,
    pub correlation: ResourceState<CorrelationSeries>,
    pub dollar_realtime: Option<RealtimeQuote>,
    pub last_updated: Option<DateTime<Local>>,
}

/// Cloned read view of one resource, handed to consumers.
#[derive(Debug, Clone)]
pub struct ResourceView<T> {
    pub value: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> ResourceView<T> {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Point-in-time copy of everything the dashboard sections read.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub stats: ResourceView<StatsSnapshot>,
    pub daily: ResourceView<DailySeries>,
    pub correlation: ResourceView<CorrelationSeries>,
    pub dollar_realtime: Option<RealtimeQuote>,
    pub last_updated: Option<DateTime<Local>>,
}

impl DashboardState {
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            stats: self.stats.view(),
            daily: self.daily.view(),
            correlation: self.correlation.view(),
            dollar_realtime: self.dollar_realtime.clone(),
            last_updated: self.last_updated,
        }
    }
}

/// Outcome of one refresh operation on one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// A network fetch ran and its result was stored.
    Fetched,
    /// The freshness gate (or a not-due sibling) suppressed the fetch.
    Skipped,
    /// The fetch ran and failed; error flag set, prior value kept.
    Failed,
}

/// Outcome of the best-effort realtime-quote enhancement, reported
/// separately from the primary result so failure isolation is visible in
/// the type rather than buried in logging.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteMerge {
    Applied(MergeOutcome),
    QuoteUnavailable(String),
    NotAttempted,
}

/// Combined outcome of a `refresh_charts` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartsRefresh {
    pub daily: Refresh,
    pub correlation: Refresh,
    pub merge: QuoteMerge,
}
