//! finhealth-core — financial health scoring and investment simulation.
//!
//! DATA FLOW (one way, no cycles):
//!   Ledger → Metric Aggregator → Scoring Classifier → Recommendation Generator
//! and, independently:
//!   Investment Simulator → Strategy Comparator
//!
//! RULES:
//!   - Every computation is a pure function over immutable inputs.
//!   - The only shared long-lived data is the read-only benchmark and
//!     strategy reference set, loaded once at construction.
//!   - All randomness flows through explicitly injected streams; a
//!     fixed seed reproduces any simulation byte for byte.

pub mod advisor;
pub mod benchmark;
pub mod compare;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod recommend;
pub mod rng;
pub mod scoring;
pub mod simulate;
pub mod types;
