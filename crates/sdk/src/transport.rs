// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use framelink_type::Result;
use serde_json::Value;

/// Callback installed by the session; receives the sender origin and the raw message.
pub type InboundHandler = Arc<dyn Fn(&str, Value) + Send + Sync>;

/// Cross-window channel between the app and its host.
///
/// Implementations deliver every inbound message to the handler passed to
/// [`Transport::listen`] and may do so synchronously from inside
/// [`Transport::post`]. The session never holds a lock while calling into the
/// transport.
pub trait Transport: Send + Sync + 'static {
	/// Start delivering inbound messages to `handler`, replacing any previous one.
	fn listen(&self, handler: InboundHandler) -> Result<()>;

	/// Post `message` to the host window, restricted to `target_origin`.
	fn post(&self, message: Value, target_origin: &str) -> Result<()>;

	/// Stop delivering inbound messages.
	fn unlisten(&self);
}

impl<T: Transport> Transport for Arc<T> {
	fn listen(&self, handler: InboundHandler) -> Result<()> {
		T::listen(self, handler)
	}

	fn post(&self, message: Value, target_origin: &str) -> Result<()> {
		T::post(self, message, target_origin)
	}

	fn unlisten(&self) {
		T::unlisten(self)
	}
}
