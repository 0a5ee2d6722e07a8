//! View-state controller.
//!
//! [`ViewController`] owns the [`ViewState`] and is its only writer. Field edits
//! apply immediately. Fetches are split into three steps so they can overlap:
//! triggering hands out a [`FetchTicket`], running the ticket against a provider
//! produces a [`Completion`], and [`ViewController::complete`] applies it.
//!
//! Every ticket carries a sequence number taken at issue time. A completion is
//! applied only if its number is above every completion already settled, so
//! when requests overlap the newest issued one decides what is shown, whatever
//! order the responses arrive in.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{FetchFailed, LocationQuery, ViewState, WeatherProvider, WeatherReport};

/// One of the two editable text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    City,
    Country,
}

/// User interaction with the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Field now holds exactly this text.
    Edit(Field, String),
    /// Enter pressed while a field has focus.
    Enter(Field),
    /// Submit control activated.
    Submit,
}

/// A fetch that has been issued but not yet run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: LocationQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &LocationQuery {
        &self.query
    }

    /// Perform the request. Exactly one provider call per ticket.
    pub async fn run(self, provider: &dyn WeatherProvider) -> Completion {
        let result = provider.get_weather(&self.query).await;
        Completion { seq: self.seq, query: self.query, result }
    }
}

/// Result of running a [`FetchTicket`].
#[derive(Debug)]
pub struct Completion {
    seq: u64,
    query: LocationQuery,
    result: Result<WeatherReport, FetchFailed>,
}

impl Completion {
    pub fn new(ticket: FetchTicket, result: Result<WeatherReport, FetchFailed>) -> Self {
        Self { seq: ticket.seq, query: ticket.query, result }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What [`ViewController::complete`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Weather fields replaced.
    Applied,
    /// A newer fetch already settled, or the ticket came from another
    /// controller; nothing changed.
    Stale,
    /// The fetch failed; nothing changed.
    Failed,
}

#[derive(Debug)]
pub struct ViewController {
    state: ViewState,
    provider: Arc<dyn WeatherProvider>,
    last_issued: u64,
    last_settled: u64,
    mounted: bool,
}

impl ViewController {
    /// Controller showing the default location.
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self::with_state(provider, ViewState::default())
    }

    pub fn with_state(provider: Arc<dyn WeatherProvider>, state: ViewState) -> Self {
        Self { state, provider, last_issued: 0, last_settled: 0, mounted: false }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn provider(&self) -> Arc<dyn WeatherProvider> {
        Arc::clone(&self.provider)
    }

    /// Tickets issued after the newest settled completion.
    pub fn in_flight(&self) -> u64 {
        self.last_issued.saturating_sub(self.last_settled)
    }

    /// Initial fetch. Only the first call issues a ticket.
    pub fn mount(&mut self) -> Option<FetchTicket> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        Some(self.trigger_fetch())
    }

    pub fn handle(&mut self, input: Input) -> Option<FetchTicket> {
        match input {
            Input::Edit(Field::City, text) => {
                self.state.city = text;
                None
            }
            Input::Edit(Field::Country, text) => {
                self.state.country = text;
                None
            }
            Input::Enter(_) | Input::Submit => Some(self.trigger_fetch()),
        }
    }

    /// Issue a ticket for the location currently held.
    pub fn trigger_fetch(&mut self) -> FetchTicket {
        self.last_issued += 1;
        let ticket = FetchTicket { seq: self.last_issued, query: self.state.query() };
        debug!(seq = ticket.seq, q = %ticket.query.to_query(), "fetch issued");
        ticket
    }

    pub fn complete(&mut self, completion: Completion) -> FetchOutcome {
        let Completion { seq, query, result } = completion;

        if seq > self.last_issued {
            debug!(seq, last_issued = self.last_issued, "discarding completion not issued here");
            return FetchOutcome::Stale;
        }
        if seq <= self.last_settled {
            debug!(seq, last_settled = self.last_settled, "discarding stale completion");
            return FetchOutcome::Stale;
        }
        self.last_settled = seq;

        match result {
            Ok(report) => {
                info!(seq, q = %query.to_query(), "weather updated");
                self.state.apply_report(report);
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(seq, q = %query.to_query(), error = %err, "weather fetch failed");
                FetchOutcome::Failed
            }
        }
    }

    /// Trigger a fetch, wait for it, and apply the result.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let ticket = self.trigger_fetch();
        let provider = self.provider();
        let completion = ticket.run(provider.as_ref()).await;
        self.complete(completion)
    }
}
