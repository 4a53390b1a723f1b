//! Request-side domain types
//!
//! Input is validated when these types are built. Invalid input returns
//! ValidationError, not panic.

pub mod validation;
pub mod fake_time;
pub mod listing;

pub use validation::ValidationError;
pub use fake_time::FakeTime;
pub use listing::{LimitParams, ListingParams, SortOrder, TimelineParams, DEFAULT_LIMIT};
