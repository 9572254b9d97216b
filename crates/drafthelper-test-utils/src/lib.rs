// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for drafthelper integration tests.
//!
//! Provides a scripted completion provider and a harness wiring it to a
//! temporary SQLite draft store, so tests never touch the network.
//!
//! # Components
//!
//! - [`MockProvider`] - Completion provider with queued responses and call recording
//! - [`TestHarness`] - Mock provider plus temp-file draft store

pub mod harness;
pub mod mock_provider;

pub use harness::TestHarness;
pub use mock_provider::MockProvider;
