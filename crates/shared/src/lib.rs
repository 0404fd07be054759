//! Types shared by the round controller, the score store and the front ends.

pub mod domain;
pub mod error;
pub mod protocol;
