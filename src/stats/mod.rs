//! Run statistics: merge-friendly tallies and trial recording.

mod recorder;
mod tally;

pub use recorder::{default_interest_list, TrialRecorder};
pub use tally::{Tally, TallyAccumulator};
