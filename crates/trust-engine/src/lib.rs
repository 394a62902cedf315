//! Trust scoring for pseudonymous peer-to-peer loan applicants.
//!
//! Evidence from a code-hosting account, prior loan performance and an identity
//! verification check is folded into a bounded trust score, a risk category,
//! improvement recommendations and an advisory interest-rate multiplier.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
