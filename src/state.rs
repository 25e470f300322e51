use crate::clock::Clock;
use crate::storage::RecordStore;
use crate::tracker::Tracker;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Tracker,
    pub default_session: Arc<str>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        default_session: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            tracker: Tracker::new(store, clock),
            default_session: default_session.into(),
        }
    }
}
