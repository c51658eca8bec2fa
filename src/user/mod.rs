//! User identity — the persisted personalization record and its store.

pub mod model;
pub mod store;

pub use model::{BirthCoordinates, UserAccount};
pub use store::{FileUserStore, UserStore};
