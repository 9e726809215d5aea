pub mod counter;
pub mod segment;
pub mod topic;
pub mod utterance;

pub use counter::*;
pub use segment::*;
pub use topic::*;
pub use utterance::*;
