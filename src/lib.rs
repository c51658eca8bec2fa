//! Cometta app core — onboarding wizard, root navigation, and local
//! identity persistence for the horoscope app.
//!
//! This crate is the embeddable, UI-free core: the host app renders screens
//! and forwards user input to [`OnboardingMachine`] and
//! [`RootFlowController`], reading state snapshots back out. Networking
//! (geocoding search, personalization submission) and persistence sit
//! behind trait seams so hosts and tests can substitute fakes.

pub mod app;
pub mod config;
pub mod error;
pub mod net;
pub mod onboarding;
pub mod user;

pub use app::{RootFlowController, RootScreen};
pub use config::AppConfig;
pub use error::{Error, NetworkError, Result, StorageError};
pub use net::{
    HttpLocationSearchClient, HttpPersonalizationClient, LocationSearchClient,
    PersonalizationClient, SearchLocation,
};
pub use onboarding::{GenderOption, OnboardingMachine, OnboardingState, OnboardingStep};
pub use user::{FileUserStore, UserAccount, UserStore};
