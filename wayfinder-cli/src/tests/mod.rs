//! Shared test harness modules for the Wayfinder CLI.

use super::*;

mod helpers;
mod import_unit;
