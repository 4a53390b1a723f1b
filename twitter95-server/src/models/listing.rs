//! Listing parameters shared by the tweet and user routes

use serde::Deserialize;

use super::FakeTime;

/// Default number of rows returned by listing routes
pub const DEFAULT_LIMIT: u32 = 10;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Sort direction for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// Map the `ascending` query flag.
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    /// SQL keyword. Only ever rendered from the enum, never from input.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Query for `/timeline/` and `/posts/`
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineParams {
    pub fake_time: FakeTime,
    pub user_id: i64,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub ascending: bool,
}

impl TimelineParams {
    pub fn order(&self) -> SortOrder {
        SortOrder::from_ascending(self.ascending)
    }
}

/// Query for the unfiltered `/tweets/` and `/users/` listings
#[derive(Debug, Clone, Deserialize)]
pub struct ListingParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub ascending: bool,
}

impl ListingParams {
    pub fn order(&self) -> SortOrder {
        SortOrder::from_ascending(self.ascending)
    }
}

impl Default for ListingParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            ascending: false,
        }
    }
}

/// Query carrying only a limit
#[derive(Debug, Clone, Deserialize)]
pub struct LimitParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
}
