//! Session state machine around a [`WeatherProvider`].
//!
//! `Idle -> Loading -> {Success, Failed}`, and back to `Loading` on every new
//! query. Each fetch gets a [`RequestId`]; only the latest one may settle the
//! state, so an older response that arrives late is dropped.

use tracing::{debug, info, warn};

use crate::{
    FetchError, WeatherProvider,
    model::{RequestState, WeatherReport},
};

/// Identifies one issued fetch. Ids grow monotonically per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Debug)]
pub struct WeatherClient<P> {
    provider: P,
    default_location: String,
    state: RequestState,
    last_issued: u64,
}

impl<P: WeatherProvider> WeatherClient<P> {
    pub fn new(provider: P, default_location: impl Into<String>) -> Self {
        Self {
            provider,
            default_location: default_location.into(),
            state: RequestState::Idle,
            last_issued: 0,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn default_location(&self) -> &str {
        &self.default_location
    }

    /// First fetch of a session, for the configured default location.
    pub async fn startup(&mut self) -> &RequestState {
        let location = self.default_location.clone();
        self.fetch_weather(&location).await
    }

    /// User-initiated search. Returns `false` (and changes nothing) for an empty query.
    pub async fn submit(&mut self, query: &str) -> bool {
        if is_blank(query) {
            return false;
        }
        self.fetch_weather(query).await;
        true
    }

    /// Fetch `query` and settle the state to `Success` or `Failed`.
    /// A blank query is ignored.
    pub async fn fetch_weather(&mut self, query: &str) -> &RequestState {
        let Some(id) = self.begin(query) else {
            return &self.state;
        };
        debug!(request = id.0, query, "Fetch started");

        let result = self.provider.fetch_report(query).await;
        self.complete(id, result);
        &self.state
    }

    /// Start a fetch: enter `Loading` and hand out the id that must settle it.
    /// `None` for a blank query, with no transition.
    pub fn begin(&mut self, query: &str) -> Option<RequestId> {
        if is_blank(query) {
            debug!("Ignoring empty query");
            return None;
        }

        self.last_issued += 1;
        self.state = RequestState::Loading;
        Some(RequestId(self.last_issued))
    }

    /// Settle the fetch `id`. Returns `false` if a newer fetch has been issued
    /// since, in which case the result is discarded.
    pub fn complete(&mut self, id: RequestId, result: Result<WeatherReport, FetchError>) -> bool {
        if id.0 != self.last_issued {
            warn!(request = id.0, latest = self.last_issued, "Discarding stale weather response");
            return false;
        }

        self.state = match result {
            Ok(report) => {
                info!(
                    current = report.current.is_some(),
                    forecast_days = report.forecast.len(),
                    "Weather fetched"
                );
                RequestState::Success(report)
            }
            Err(err) => {
                warn!(error = %err, "Weather fetch failed");
                RequestState::Failed { message: err.user_message().to_string() }
            }
        };
        true
    }
}

fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}
