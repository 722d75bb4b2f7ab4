//! Car-insurance applicant dataset corrector
//!
//! This crate cleans a tabular dataset of insurance applicants before it is
//! used to model premiums: it removes empty and duplicate rows, drops rows
//! whose education level is implausible for the applicant's age, reassigns
//! employment statuses that contradict the age toward a target distribution,
//! and caps driving experience at what the age allows.

#![warn(missing_docs)]

pub mod api;
pub mod cli;
pub mod config;
pub mod correction;
pub mod error;
pub mod io;
pub mod models;
