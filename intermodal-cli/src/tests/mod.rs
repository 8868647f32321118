//! Shared test harness modules for the intermodal CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod compare_steps;
mod helpers;
mod route_steps;
mod route_unit;
