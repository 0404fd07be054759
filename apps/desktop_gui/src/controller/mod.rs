//! Controller layer: UI events from the backend worker and command orchestration.

pub mod events;
pub mod orchestration;
