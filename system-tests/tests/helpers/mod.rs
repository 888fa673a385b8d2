// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for MCS system-tests.
// Purpose: Provide fixtures, backend builders, trace recording and a stored-row table.
// Dependencies: system-tests, mcs-config, mcs-core, mcs-hql, mcs-sql, mcs-translate
// ============================================================================

//! ## Overview
//! Shared helpers for MCS system-tests.
//! Invariants:
//! - System-test execution is deterministic and fail-closed.
//! - Both backends are driven from the same config and the same accessor calls.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod fixtures;
pub mod recording;
pub mod store;
