//! Data layer: core types, loading, filtering, and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → IndicatorDataset
//!   └──────────┘
//!        │
//!        ├──────────────────────────────┐
//!        ▼                              ▼
//!   ┌──────────┐                  ┌───────────┐
//!   │  filter   │  country match  │ aggregate  │  per-year means
//!   └──────────┘  → row indices   └───────────┘  → Vec<YearSummary>
//! ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
