//! Test utilities shared by unit and route tests.
//!
//! This module provides:
//! - Test data factories for events and stored records
//! - An in-memory subscription record repository
//! - A builder for `AppState` wired to the in-memory repository

mod app_state_builder;
mod factories;
mod record_mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use record_mocks::*;
