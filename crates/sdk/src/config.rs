// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Version reported in the handshake.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Mobile hosts older than this major version reject a handshake carrying `sdk_version`.
pub const HANDSHAKE_SDK_VERSION_MINIMUM_MOBILE_VERSION: i64 = 250;

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
	/// Application id registered with the host.
	pub client_id: String,

	/// Keep log events local instead of forwarding them to the host once READY.
	///
	/// Default: false
	pub disable_console_log_override: bool,
}

impl SdkConfig {
	pub fn new(client_id: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			disable_console_log_override: false,
		}
	}

	pub fn disable_console_log_override(mut self, disable: bool) -> Self {
		self.disable_console_log_override = disable;
		self
	}
}
