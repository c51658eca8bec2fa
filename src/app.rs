//! Root navigation flow — selects between the Splash, Onboarding, and Main
//! screens.

use std::sync::Arc;

use crate::user::UserStore;

/// Top-level screen of the app.
///
/// `Splash` is the transient startup state; `Onboarding` persists until a
/// successful submission; `Main` persists until logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootScreen {
    #[default]
    Splash,
    Onboarding,
    Main,
}

impl std::fmt::Display for RootScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Splash => "splash",
            Self::Onboarding => "onboarding",
            Self::Main => "main",
        };
        write!(f, "{s}")
    }
}

/// Pure router keyed off the user store and the completion/logout signals.
/// Holds no business data.
pub struct RootFlowController {
    screen: RootScreen,
    store: Arc<dyn UserStore>,
}

impl RootFlowController {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            screen: RootScreen::Splash,
            store,
        }
    }

    pub fn screen(&self) -> RootScreen {
        self.screen
    }

    /// Pick the initial screen from the persisted state. Called once at
    /// startup; a store read failure is logged and treated as a cold start.
    pub fn start(&mut self) -> RootScreen {
        let has_account = match self.store.load() {
            Ok(account) => account.is_some(),
            Err(e) => {
                tracing::warn!("failed to load user record at startup: {e}");
                false
            }
        };
        self.screen = if has_account || self.store.has_seen_onboarding() {
            RootScreen::Main
        } else {
            RootScreen::Onboarding
        };
        tracing::info!(screen = %self.screen, "root flow started");
        self.screen
    }

    /// The onboarding machine finished a successful submission.
    pub fn on_onboarding_completed(&mut self) {
        tracing::info!("onboarding completed, entering main");
        self.screen = RootScreen::Main;
    }

    /// Clear the persisted identity and return to onboarding. Store
    /// failures are logged but never block the transition.
    pub fn on_logout(&mut self) {
        if let Err(e) = self.store.delete() {
            tracing::warn!("failed to delete user record on logout: {e}");
        }
        if let Err(e) = self.store.set_has_seen_onboarding(false) {
            tracing::warn!("failed to clear onboarding flag on logout: {e}");
        }
        tracing::info!("logged out, returning to onboarding");
        self.screen = RootScreen::Onboarding;
    }
}
