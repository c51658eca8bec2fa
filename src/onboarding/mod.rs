//! Onboarding wizard — step sequencing, debounced location search, and
//! personalization submission.

pub mod machine;
pub mod state;

pub use machine::OnboardingMachine;
pub use state::{
    Direction, GenderOption, OnboardingState, OnboardingStep, PersonalizationDraft,
};
