// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Write},
	sync::{Weak, atomic::Ordering},
};

use framelink_wire_format::Command;
use tracing::{
	Level, Subscriber,
	field::{Field, Visit},
};
use tracing_subscriber::{Layer, layer::Context};

use crate::{
	command::{CaptureLogArgs, CaptureLogLevel, CommandRequest},
	session::{Session, SessionInner},
	transport::Transport,
};

/// Events from this library's own crates are never forwarded.
const INTERNAL_TARGET: &str = "framelink";

/// `tracing` layer that mirrors log events to the host as CAPTURE_LOG commands.
///
/// Forwarding starts when the session becomes ready, unless
/// `disable_console_log_override` is set, and stops when it closes. Replies
/// are not awaited.
///
/// ```no_run
/// # fn install<T: framelink_sdk::Transport>(session: &framelink_sdk::Session<T>) {
/// use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
///
/// tracing_subscriber::registry().with(framelink_sdk::HostLogLayer::new(session)).init();
/// # }
/// ```
pub struct HostLogLayer<T: Transport> {
	session: Weak<SessionInner<T>>,
}

impl<T: Transport> HostLogLayer<T> {
	pub fn new(session: &Session<T>) -> Self {
		Self {
			session: session.downgrade(),
		}
	}
}

impl<S: Subscriber, T: Transport> Layer<S> for HostLogLayer<T> {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
		let metadata = event.metadata();
		if metadata.target().starts_with(INTERNAL_TARGET) {
			return;
		}
		let Some(session) = self.session.upgrade() else {
			return;
		};
		if !session.capture.load(Ordering::Acquire) {
			return;
		}

		let mut visitor = MessageVisitor::default();
		event.record(&mut visitor);
		let args = CaptureLogArgs {
			level: capture_level(metadata.level()),
			message: visitor.finish(),
		};
		let Ok(args) = serde_json::to_value(&args) else {
			return;
		};
		// fire and forget
		let _ = session.send_command(CommandRequest::new(Command::CaptureLog, Some(args)));
	}
}

fn capture_level(level: &Level) -> CaptureLogLevel {
	if *level == Level::ERROR {
		CaptureLogLevel::Error
	} else if *level == Level::WARN {
		CaptureLogLevel::Warn
	} else if *level == Level::INFO {
		CaptureLogLevel::Info
	} else if *level == Level::DEBUG {
		CaptureLogLevel::Debug
	} else {
		CaptureLogLevel::Log
	}
}

#[derive(Default)]
struct MessageVisitor {
	message: String,
	fields: String,
}

impl MessageVisitor {
	fn finish(self) -> String {
		let mut message = self.message;
		message.push_str(&self.fields);
		message
	}
}

impl Visit for MessageVisitor {
	fn record_str(&mut self, field: &Field, value: &str) {
		if field.name() == "message" {
			self.message.push_str(value);
		} else {
			let _ = write!(self.fields, " {}={}", field.name(), value);
		}
	}

	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		if field.name() == "message" {
			let _ = write!(self.message, "{:?}", value);
		} else {
			let _ = write!(self.fields, " {}={:?}", field.name(), value);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_capture_level() {
		assert_eq!(capture_level(&Level::ERROR), CaptureLogLevel::Error);
		assert_eq!(capture_level(&Level::WARN), CaptureLogLevel::Warn);
		assert_eq!(capture_level(&Level::INFO), CaptureLogLevel::Info);
		assert_eq!(capture_level(&Level::DEBUG), CaptureLogLevel::Debug);
		assert_eq!(capture_level(&Level::TRACE), CaptureLogLevel::Log);
	}
}
