//! Run lifecycle: phases and outcomes

pub mod outcome;
pub mod phase;
