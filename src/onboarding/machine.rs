//! OnboardingMachine — drives the wizard end-to-end: step navigation,
//! debounced location search, and personalization submission.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use tokio::sync::{RwLock, mpsc};

use crate::config::AppConfig;
use crate::net::{LocationSearchClient, PersonalizationClient, SearchLocation};
use crate::user::{UserAccount, UserStore};

use super::state::{Direction, GenderOption, OnboardingState, SELECT_LOCATION_MESSAGE};

/// Coordinates the onboarding wizard.
///
/// All methods take `&self` and are invoked serially by the host UI; the
/// only background work is the debounce task spawned per search keystroke.
/// Stale searches are superseded through a request-generation counter
/// rather than live cancellation handles: a completion is applied only if
/// its captured generation is still current.
pub struct OnboardingMachine {
    state: Arc<RwLock<OnboardingState>>,
    search_client: Arc<dyn LocationSearchClient>,
    personalization: Arc<dyn PersonalizationClient>,
    store: Arc<dyn UserStore>,
    search_generation: Arc<AtomicU64>,
    completion_tx: mpsc::UnboundedSender<UserAccount>,
    search_debounce: Duration,
    min_query_len: usize,
}

impl OnboardingMachine {
    /// Create a machine and the channel on which it emits the completed
    /// identity after a successful submission.
    pub fn new(
        search_client: Arc<dyn LocationSearchClient>,
        personalization: Arc<dyn PersonalizationClient>,
        store: Arc<dyn UserStore>,
        config: &AppConfig,
    ) -> (Self, mpsc::UnboundedReceiver<UserAccount>) {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let machine = Self {
            state: Arc::new(RwLock::new(OnboardingState::default())),
            search_client,
            personalization,
            store,
            search_generation: Arc::new(AtomicU64::new(0)),
            completion_tx,
            search_debounce: config.search_debounce,
            min_query_len: config.min_query_len,
        };
        (machine, completion_rx)
    }

    /// Cloned snapshot of the current wizard state.
    pub async fn state(&self) -> OnboardingState {
        self.state.read().await.clone()
    }

    /// Move to the next page. No-op on the last page — submission is a
    /// separate explicit action, never an implicit advance past the end.
    pub async fn advance(&self) {
        let mut state = self.state.write().await;
        if let Some(next) = state.step.next() {
            state.direction = Direction::Forward;
            state.step = next;
        }
    }

    /// Move to the previous page. No-op on the first page.
    pub async fn retreat(&self) {
        let mut state = self.state.write().await;
        if let Some(previous) = state.step.previous() {
            state.direction = Direction::Backward;
            state.step = previous;
        }
    }

    pub async fn set_birth_date(&self, date: NaiveDate) {
        self.state.write().await.draft.birth_date = date;
    }

    pub async fn set_birth_time(&self, time: NaiveTime) {
        self.state.write().await.draft.birth_time = time;
    }

    /// Record the gender selection. Does not advance the step — any
    /// auto-advance UX is layered on top by the host.
    pub async fn set_gender(&self, gender: GenderOption) {
        self.state.write().await.draft.gender = Some(gender);
    }

    /// Update the live search query.
    ///
    /// Queries shorter than the minimum clear the result list and the
    /// selected location without dispatching anything. Longer queries are
    /// debounced: after the quiet window the latest query is sent, and only
    /// the most recently issued search may populate the results.
    pub async fn set_search_text(&self, query: &str) {
        // Bumping the generation supersedes any pending or in-flight search.
        let generation = self.search_generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().await;
            state.search_text = query.to_string();
            if query.chars().count() < self.min_query_len {
                state.results.clear();
                state.draft.location = None;
                return;
            }
        }

        let state = Arc::clone(&self.state);
        let client = Arc::clone(&self.search_client);
        let current = Arc::clone(&self.search_generation);
        let debounce = self.search_debounce;
        let query = query.to_string();

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if current.load(Ordering::SeqCst) != generation {
                // Superseded during the quiet window; never hits the network.
                return;
            }

            let outcome = client.search(&query).await;

            // The staleness check must happen while holding the lock: a
            // selection or a newer keystroke may land between a bare check
            // and the lock acquisition, and this task must not clobber it.
            let mut state = state.write().await;
            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!(%query, "discarding superseded search response");
                return;
            }
            match outcome {
                Ok(results) => state.results = results,
                Err(e) => {
                    // Search failures are non-fatal to the wizard: clear the
                    // list, leave the error field alone.
                    tracing::warn!(%query, "location search failed: {e}");
                    state.results.clear();
                }
            }
        });
    }

    /// Pick a location from the results. Selection closes the result list;
    /// a still-pending search must not reopen it.
    pub async fn select_location(&self, location: SearchLocation) {
        self.search_generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        state.draft.location = Some(location);
        state.results.clear();
    }

    /// Submit the collected draft to the personalization API.
    ///
    /// Guarded: requires a selected location, and overlapping calls are
    /// dropped while a submission is in flight. On success the identity is
    /// persisted and emitted on the completion channel; on failure the
    /// user-displayable message lands in `state().error` and the user may
    /// simply re-invoke.
    pub async fn submit(&self) {
        let request = {
            let mut state = self.state.write().await;
            if state.loading {
                return;
            }
            if state.draft.location.is_none() {
                state.error = Some(SELECT_LOCATION_MESSAGE.to_string());
                return;
            }
            match state.draft.to_request() {
                Ok(request) => {
                    state.loading = true;
                    state.error = None;
                    request
                }
                Err(e) => {
                    // Local validation failure (unparseable coordinates);
                    // no network call is made.
                    state.error = Some(e.to_string());
                    return;
                }
            }
        };

        let outcome = self.personalization.submit(&request).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match outcome {
            Ok(account) => {
                if let Err(e) = self.store.save(&account) {
                    tracing::warn!("failed to persist user record: {e}");
                }
                if let Err(e) = self.store.set_has_seen_onboarding(true) {
                    tracing::warn!("failed to persist onboarding flag: {e}");
                }
                tracing::info!(id = %account.id, "onboarding completed");
                state.account = Some(account.clone());
                let _ = self.completion_tx.send(account);
            }
            Err(e) => {
                tracing::warn!("personalization submission failed: {e}");
                state.error = Some(e.to_string());
            }
        }
    }
}
