// Query state machine for async fetches.
// One enum covering the five observable states of a cached query.

/// Observable state of a cached fetch.
///
/// `Refetching` keeps the previous data so the view can keep rendering the
/// last known list while a refresh is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryState<T> {
    /// Never requested.
    #[default]
    Idle,
    /// First request in flight, nothing to show yet.
    Loading,
    /// Refresh in flight, previous data still available.
    Refetching(T),
    /// Last request settled successfully.
    Success(T),
    /// Last request settled with an error.
    Error(String),
}

impl<T> QueryState<T> {
    /// True while any request is in flight.
    pub fn is_fetching(&self) -> bool {
        matches!(self, QueryState::Loading | QueryState::Refetching(_))
    }

    /// True only for the initial in-flight request.
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryState::Success(_))
    }

    /// Last known data, if any. Present during a refetch.
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) | QueryState::Refetching(data) => Some(data),
            _ => None,
        }
    }

    /// Error message, if the last request settled with one.
    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Transition into the in-flight state for a new request: `Refetching`
    /// when previous data exists, `Loading` otherwise.
    pub fn begin_fetch(self) -> Self {
        match self {
            QueryState::Success(data) | QueryState::Refetching(data) => {
                QueryState::Refetching(data)
            }
            _ => QueryState::Loading,
        }
    }
}
