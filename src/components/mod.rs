//! UI Components
//!
//! Leptos components for the voting and admin views.

mod admin_page;
mod board_header;
mod reset_votes_button;
mod sync_status;
mod vote_board;
mod vote_column;

pub use admin_page::AdminPage;
pub use board_header::BoardHeader;
pub use reset_votes_button::ResetVotesButton;
pub use sync_status::SyncStatus;
pub use vote_board::VoteBoard;
pub use vote_column::VoteColumn;
