//! End-to-end onboarding flow tests.
//!
//! Each test wires the real machine, root controller, and on-disk store
//! together with stub network clients, and walks the app lifecycle the way
//! the host UI would: splash → onboarding wizard → submission → main, plus
//! logout and relaunch.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use cometta_core::error::NetworkError;
use cometta_core::net::PersonalizationRequest;
use cometta_core::onboarding::GenderOption;
use cometta_core::user::BirthCoordinates;
use cometta_core::{
    AppConfig, FileUserStore, LocationSearchClient, OnboardingMachine, OnboardingStep,
    PersonalizationClient, RootFlowController, RootScreen, SearchLocation, UserAccount,
    UserStore,
};

/// Stub geocoding client — one fixed candidate per query.
struct StubSearch;

#[async_trait]
impl LocationSearchClient for StubSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchLocation>, NetworkError> {
        Ok(vec![SearchLocation {
            place_id: 1,
            display_name: query.to_string(),
            name: query.to_string(),
            lat: "50.45".to_string(),
            lon: "30.52".to_string(),
            kind: "city".to_string(),
            importance: 0.8,
        }])
    }
}

/// Stub personalization backend — records the request and echoes it back
/// with a server-assigned id, or fails with a fixed status.
struct StubPersonalization {
    requests: Mutex<Vec<PersonalizationRequest>>,
    fail_status: Option<u16>,
}

impl StubPersonalization {
    fn ok() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_status: None,
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_status: Some(status),
        }
    }
}

#[async_trait]
impl PersonalizationClient for StubPersonalization {
    async fn submit(&self, request: &PersonalizationRequest) -> Result<UserAccount, NetworkError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(status) = self.fail_status {
            return Err(NetworkError::Server(status));
        }
        Ok(UserAccount {
            id: "u1".to_string(),
            name: String::new(),
            email: String::new(),
            is_anonymous: true,
            birthday: request.birthday.clone(),
            birthday_time: request.birthday_time.clone(),
            birthday_coordinates: request.birthday_coordinates.clone(),
            focus: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            claimed_at: None,
        })
    }
}

#[tokio::test(start_paused = true)]
async fn full_wizard_run_reaches_main_and_persists_identity() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileUserStore::new(dir.path()));
    let personalization = Arc::new(StubPersonalization::ok());

    // Fresh install: splash → onboarding
    let mut root = RootFlowController::new(Arc::clone(&store) as Arc<dyn UserStore>);
    assert_eq!(root.screen(), RootScreen::Splash);
    assert_eq!(root.start(), RootScreen::Onboarding);

    let (machine, mut completed) = OnboardingMachine::new(
        Arc::new(StubSearch),
        Arc::clone(&personalization) as Arc<dyn PersonalizationClient>,
        Arc::clone(&store) as Arc<dyn UserStore>,
        &AppConfig::default(),
    );

    // Walk the wizard: intro → date → time → gender → location
    machine.advance().await;
    machine
        .set_birth_date(NaiveDate::from_ymd_opt(1990, 5, 15).unwrap())
        .await;
    machine.advance().await;
    machine
        .set_birth_time(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
        .await;
    machine.advance().await;
    machine.set_gender(GenderOption::Female).await;
    machine.advance().await;
    assert_eq!(machine.state().await.step, OnboardingStep::Location);

    // Type, debounce, pick the first candidate
    machine.set_search_text("Kyiv").await;
    tokio::time::sleep(Duration::from_millis(600)).await;
    let results = machine.state().await.results;
    assert_eq!(results.len(), 1);
    machine.select_location(results[0].clone()).await;

    machine.submit().await;

    // Exact wire body
    let sent = personalization.requests.lock().unwrap()[0].clone();
    assert_eq!(sent.birthday, "1990-05-15");
    assert_eq!(sent.birthday_time, "14:30:00");
    assert_eq!(
        sent.birthday_coordinates,
        BirthCoordinates {
            display: "Kyiv".to_string(),
            latitude: 50.45,
            longitude: 30.52,
        }
    );

    // Completion signal drives the root flow to main
    let account = completed.recv().await.unwrap();
    assert_eq!(account.id, "u1");
    root.on_onboarding_completed();
    assert_eq!(root.screen(), RootScreen::Main);

    // Identity persisted under the canonical record
    assert_eq!(store.load().unwrap().unwrap().id, "u1");
    assert!(store.has_seen_onboarding());

    // A relaunch goes straight to main
    let mut relaunched = RootFlowController::new(Arc::clone(&store) as Arc<dyn UserStore>);
    assert_eq!(relaunched.start(), RootScreen::Main);
}

#[tokio::test]
async fn failed_submission_keeps_user_in_onboarding() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileUserStore::new(dir.path()));

    let mut root = RootFlowController::new(Arc::clone(&store) as Arc<dyn UserStore>);
    assert_eq!(root.start(), RootScreen::Onboarding);

    let (machine, mut completed) = OnboardingMachine::new(
        Arc::new(StubSearch),
        Arc::new(StubPersonalization::failing(500)),
        Arc::clone(&store) as Arc<dyn UserStore>,
        &AppConfig::default(),
    );

    machine
        .select_location(SearchLocation {
            place_id: 1,
            display_name: "Kyiv".to_string(),
            name: "Kyiv".to_string(),
            lat: "50.45".to_string(),
            lon: "30.52".to_string(),
            kind: "city".to_string(),
            importance: 0.8,
        })
        .await;
    machine.submit().await;

    let state = machine.state().await;
    assert!(!state.loading);
    assert!(!state.error.as_deref().unwrap_or_default().is_empty());
    assert!(completed.try_recv().is_err());

    // Nothing was persisted and the screen never left onboarding
    assert!(store.load().unwrap().is_none());
    assert!(!store.has_seen_onboarding());
    assert_eq!(root.screen(), RootScreen::Onboarding);
}

#[tokio::test(start_paused = true)]
async fn logout_resets_to_a_cold_start() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileUserStore::new(dir.path()));

    // Complete onboarding once
    let (machine, mut completed) = OnboardingMachine::new(
        Arc::new(StubSearch),
        Arc::new(StubPersonalization::ok()),
        Arc::clone(&store) as Arc<dyn UserStore>,
        &AppConfig::default(),
    );
    machine.set_search_text("Kyiv").await;
    tokio::time::sleep(Duration::from_millis(600)).await;
    let candidate = machine.state().await.results[0].clone();
    machine.select_location(candidate).await;
    machine.submit().await;
    completed.recv().await.unwrap();

    let mut root = RootFlowController::new(Arc::clone(&store) as Arc<dyn UserStore>);
    assert_eq!(root.start(), RootScreen::Main);

    root.on_logout();
    assert_eq!(root.screen(), RootScreen::Onboarding);
    assert!(store.load().unwrap().is_none());
    assert!(!store.has_seen_onboarding());

    // Relaunch behaves like a fresh install
    let mut relaunched = RootFlowController::new(store);
    assert_eq!(relaunched.start(), RootScreen::Onboarding);
}
