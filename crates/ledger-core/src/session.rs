//! Session orchestration: owns the loaded ledger snapshot and the pagination state for one
//! identity, and applies completed fetches as atomic snapshot replacements.

use std::fmt;

use chrono::FixedOffset;
use tracing::{debug, info, warn};

use ledger_domain::{Displayable, Identity, MonthBucket, ReportScope, SaleRecord};

use crate::{
    error::{CoreError, CoreResult},
    export::{export_report, SalesReport},
    pagination::{PageAction, PageOutcome, PaginationState, DEFAULT_PAGE_WINDOW},
    provider::SalesProvider,
    time::{utc_offset, Clock},
    view::LedgerView,
};

pub const NO_DATA_LABEL: &str = "No Data";

/// Sequence number handed out when a fetch is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched records replaced the snapshot.
    Applied { periods: usize, sales: usize },
    /// A newer fetch was issued after this one; its result was discarded.
    Stale {
        ticket: FetchTicket,
        latest: FetchTicket,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Time zone in which sale timestamps and the current month are evaluated.
    pub offset: FixedOffset,
    pub page_window: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            offset: utc_offset(),
            page_window: DEFAULT_PAGE_WINDOW,
        }
    }
}

/// Read-side facade over the ledger of one identity.
pub struct LedgerSession<C: Clock> {
    identity: Identity,
    clock: C,
    settings: SessionSettings,
    view: LedgerView,
    pagination: PaginationState,
    issued: u64,
}

impl<C: Clock> LedgerSession<C> {
    /// Starts with an empty ledger that only holds the current month.
    pub fn new(identity: Identity, clock: C, settings: SessionSettings) -> Self {
        let view = LedgerView::empty(clock.current_period(settings.offset));
        let pagination = PaginationState::new(view.len(), settings.page_window);
        Self {
            identity,
            clock,
            settings,
            view,
            pagination,
            issued: 0,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Switches to another identity, clearing the snapshot and invalidating in-flight fetches.
    pub fn set_identity(&mut self, identity: Identity) {
        if identity == self.identity {
            return;
        }
        info!(from = %self.identity, to = %identity, "switching ledger identity");
        self.identity = identity;
        self.issued += 1;
        self.view = LedgerView::empty(self.clock.current_period(self.settings.offset));
        self.pagination = PaginationState::new(self.view.len(), self.settings.page_window);
    }

    pub fn ledger_view(&self) -> &LedgerView {
        &self.view
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Issues a ticket for a fetch about to start. Only the latest ticket may be applied.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    ///
    /// Results of superseded fetches are discarded. A failed fetch or a malformed record keeps
    /// the previous snapshot and is returned to the caller.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: CoreResult<Vec<SaleRecord>>,
    ) -> CoreResult<RefreshOutcome> {
        let latest = FetchTicket(self.issued);
        if ticket < latest {
            warn!(%ticket, %latest, "discarding stale sales fetch");
            return Ok(RefreshOutcome::Stale { ticket, latest });
        }

        let records = result.map_err(|err| {
            warn!(identity = %self.identity, error = %err, "sales fetch failed, keeping last snapshot");
            match err {
                CoreError::FetchFailure(_) => err,
                other => CoreError::FetchFailure(other.to_string()),
            }
        })?;

        let current = self.clock.current_period(self.settings.offset);
        let view = LedgerView::from_records(records, current, self.settings.offset).map_err(
            |err| {
                warn!(identity = %self.identity, error = %err, "rejected sales snapshot, keeping last one");
                err
            },
        )?;

        self.pagination = self.pagination.resized(view.len());
        self.view = view;
        let outcome = RefreshOutcome::Applied {
            periods: self.view.len(),
            sales: self.view.sale_count(),
        };
        debug!(%ticket, ?outcome, "ledger snapshot replaced");
        Ok(outcome)
    }

    /// Fetches the identity's sales from `provider` and applies them.
    pub fn refresh<P>(&mut self, provider: &P) -> CoreResult<RefreshOutcome>
    where
        P: SalesProvider + ?Sized,
    {
        let ticket = self.begin_fetch();
        let result = provider.fetch_sales(&self.identity);
        self.complete_fetch(ticket, result)
    }

    pub fn go_to_page(&mut self, page: usize) -> PageOutcome {
        self.navigate(PageAction::GoTo(page))
    }

    pub fn next(&mut self) -> PageOutcome {
        self.navigate(PageAction::Next)
    }

    pub fn previous(&mut self) -> PageOutcome {
        self.navigate(PageAction::Previous)
    }

    fn navigate(&mut self, action: PageAction) -> PageOutcome {
        let outcome = self.pagination.apply(action);
        match outcome {
            PageOutcome::OutOfRange {
                requested,
                total_pages,
            } => warn!(requested, total_pages, "ignoring out-of-range page request"),
            _ => debug!(?action, ?outcome, "pagination updated"),
        }
        outcome
    }

    /// The bucket on the current page, if that page exists.
    pub fn current_bucket(&self) -> Option<&MonthBucket> {
        self.view.page(self.pagination.current_page())
    }

    /// `"<Month>, <Year>"` for the current page, or `"No Data"`.
    pub fn current_label(&self) -> String {
        self.current_bucket()
            .map(Displayable::display_label)
            .unwrap_or_else(|| NO_DATA_LABEL.to_string())
    }

    /// Exports against the currently loaded snapshot, independent of pagination.
    pub fn export_report(&self, scope: ReportScope) -> SalesReport {
        let report = export_report(&self.view, scope);
        debug!(%scope, lines = report.lines.len(), "report exported");
        report
    }
}
