// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Participant, WILDCARD_DAY};
pub use requests::RosterRow;
pub use responses::{ErrorResponse, MatchReport, PairSummary};
