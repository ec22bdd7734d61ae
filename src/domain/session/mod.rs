//! Session domain: a user's recent contact list.

pub mod client;
pub mod wire;

pub use wire::{SessionItem, SessionListResponse};

/// `AssistFlags` requesting top-pinned sessions, empty sessions, the
/// `MsgTime` of each entry and draft text.
pub const DEFAULT_ASSIST_FLAGS: u32 = 15;

/// Paging position in a session list. The default is the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCursor {
    /// Start time of ordinary sessions; 0 on the first page.
    pub time_stamp: i64,
    pub start_index: i64,
    /// Start time of pinned sessions; 0 on the first page.
    pub top_time_stamp: i64,
    pub top_start_index: i64,
    pub assist_flags: u32,
}

impl Default for SessionCursor {
    fn default() -> Self {
        Self {
            time_stamp: 0,
            start_index: 0,
            top_time_stamp: 0,
            top_start_index: 0,
            assist_flags: DEFAULT_ASSIST_FLAGS,
        }
    }
}

impl SessionCursor {
    /// Cursor for the page after `page`, or `None` once the list is complete.
    pub fn next_page(&self, page: &SessionListResponse) -> Option<Self> {
        if page.complete_flag == 1 {
            return None;
        }
        Some(Self {
            time_stamp: page.time_stamp,
            start_index: page.start_index,
            top_time_stamp: page.top_time_stamp,
            top_start_index: page.top_start_index,
            assist_flags: self.assist_flags,
        })
    }
}

/// The conversation a session refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTarget {
    /// One-to-one chat with the given user.
    C2c(String),
    /// Group chat with the given group id.
    Group(String),
}

impl SessionTarget {
    /// Wire `Type`: 1 for C2C, 2 for group.
    pub fn kind(&self) -> u8 {
        match self {
            Self::C2c(_) => 1,
            Self::Group(_) => 2,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::C2c(id) | Self::Group(id) => id,
        }
    }
}
