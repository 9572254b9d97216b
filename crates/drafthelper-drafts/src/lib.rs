// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draft generation for drafthelper.
//!
//! [`DraftService`] turns an email or post request into a prompt, asks the
//! completion provider for text, and persists the result as a new draft.

pub mod prompts;
pub mod service;

pub use service::{require_text, DraftService, DraftState};
