//! Onboarding wizard state — steps, direction, and the collected draft.

use chrono::{NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::net::{PersonalizationRequest, SearchLocation};
use crate::user::{BirthCoordinates, UserAccount};

/// Inline error shown when submission is attempted without a selected
/// location.
pub(crate) const SELECT_LOCATION_MESSAGE: &str = "Please select your place of birth";

/// The pages of the onboarding wizard, in order.
///
/// Progresses linearly: Intro → Date → Time → Gender → Location.
/// `Location` is terminal for forward motion; the only exit from it is a
/// successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Intro,
    Date,
    Time,
    Gender,
    Location,
}

impl OnboardingStep {
    /// The next step in the linear progression, if any.
    pub fn next(&self) -> Option<OnboardingStep> {
        use OnboardingStep::*;
        match self {
            Intro => Some(Date),
            Date => Some(Time),
            Time => Some(Gender),
            Gender => Some(Location),
            Location => None,
        }
    }

    /// The previous step, if any.
    pub fn previous(&self) -> Option<OnboardingStep> {
        use OnboardingStep::*;
        match self {
            Intro => None,
            Date => Some(Intro),
            Time => Some(Date),
            Gender => Some(Time),
            Location => Some(Gender),
        }
    }

    /// Whether this is the last page of the wizard.
    pub fn is_last(&self) -> bool {
        matches!(self, Self::Location)
    }
}

impl Default for OnboardingStep {
    fn default() -> Self {
        Self::Intro
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Intro => "intro",
            Self::Date => "date",
            Self::Time => "time",
            Self::Gender => "gender",
            Self::Location => "location",
        };
        write!(f, "{s}")
    }
}

/// Which way the user last navigated. Picks the page transition animation
/// in the host UI; functionally inert here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Gender selection offered during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderOption {
    #[serde(rename = "Male")]
    Male,
    #[serde(rename = "Female")]
    Female,
    #[serde(rename = "Prefer not to say")]
    NotSpecified,
}

/// Birth data collected across the wizard pages.
///
/// Submission is only valid once a location has been selected.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalizationDraft {
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    pub location: Option<SearchLocation>,
    pub gender: Option<GenderOption>,
}

impl Default for PersonalizationDraft {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            birth_date: now.date_naive(),
            birth_time: now.time().with_nanosecond(0).unwrap_or_else(|| now.time()),
            location: None,
            gender: None,
        }
    }
}

impl PersonalizationDraft {
    /// Build the wire request from the draft.
    ///
    /// Fails locally (no network round trip) when no location is selected or
    /// its coordinate strings don't parse as numbers. Both error messages
    /// are user-displayable.
    pub fn to_request(&self) -> Result<PersonalizationRequest, NetworkError> {
        let location = self
            .location
            .as_ref()
            .ok_or_else(|| NetworkError::Validation(SELECT_LOCATION_MESSAGE.to_string()))?;
        let (latitude, longitude) = location.coordinates()?;
        Ok(PersonalizationRequest {
            birthday: self.birth_date.format("%Y-%m-%d").to_string(),
            birthday_time: self.birth_time.format("%H:%M:%S").to_string(),
            birthday_coordinates: BirthCoordinates {
                display: location.display_name.clone(),
                latitude,
                longitude,
            },
            name: None,
            email: None,
        })
    }
}

/// The whole onboarding flow state, owned by the machine and snapshot-cloned
/// out to the host UI.
#[derive(Debug, Clone, Default)]
pub struct OnboardingState {
    pub step: OnboardingStep,
    pub direction: Direction,
    pub draft: PersonalizationDraft,
    /// Live search field contents.
    pub search_text: String,
    /// Current geocoding candidates for the search field.
    pub results: Vec<SearchLocation>,
    /// True while a submission is in flight.
    pub loading: bool,
    pub error: Option<String>,
    /// Set only after a successful submission; its presence is the
    /// completion signal.
    pub account: Option<UserAccount>,
}
