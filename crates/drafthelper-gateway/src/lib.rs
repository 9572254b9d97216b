// SPDX-FileCopyrightText: 2026 Drafthelper Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for drafthelper.
//!
//! Serves the landing page, the draft generation endpoints, the draft
//! history and a health probe.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, start_server, GatewayState};
