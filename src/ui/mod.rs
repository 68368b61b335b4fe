//! UI layer: panels plus the two coordinated plot views.

pub mod panels;
pub mod ranking;
pub mod trend;
