//! Tracker state: the data model, partial updates, and the store that owns
//! them.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use mandal::state::{Challenge, Store};
//!
//! let mut store = Store::in_memory();
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! store.create_challenge(Challenge::new("Spring", start, 48).unwrap()).unwrap();
//!
//! let challenge = store.state().active_challenge.clone().unwrap();
//! assert_eq!(challenge.end_date, NaiveDate::from_ymd_opt(2024, 4, 18).unwrap());
//! ```

pub mod id;
pub mod model;
pub mod store;
pub mod update;

pub use id::SessionId;
pub use model::{
    AppState, Challenge, NewSession, Period, PlaylistEntry, PlaylistKind, Playlists, Session,
    Theme, DEFAULT_USER_NAME,
};
pub use store::{PlaylistOutcome, Store, TickOutcome};
pub use update::StateUpdate;
