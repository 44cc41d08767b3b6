// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test support for framelink: an in-memory [`MockTransport`] standing in for
//! the host window, and builders for the frames a host sends.

pub mod host;
pub mod mock;

pub use mock::{MockTransport, Posted};
