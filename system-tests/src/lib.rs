// system-tests/src/lib.rs
// ============================================================================
// Module: MCS System Tests Library
// Description: Shared configuration for system test scenarios.
// Purpose: Provide common settings for the MCS system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the system-test binaries in
//! `system-tests/tests`, which drive both query backends over the same
//! accessor calls and stored values.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
