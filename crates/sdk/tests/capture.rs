// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use framelink_sdk::{HostLogLayer, Session};
use framelink_testing::{MockTransport, host};
use serde_json::json;
use tracing_subscriber::{Registry, layer::SubscriberExt};

fn connect(disable_console_log_override: bool) -> (Session<MockTransport>, MockTransport) {
	let transport = MockTransport::new();
	let config = host::config().disable_console_log_override(disable_console_log_override);
	let session = Session::connect(config, host::location(), transport.clone()).unwrap();
	(session, transport)
}

#[test]
fn test_forwards_app_logs_once_ready() {
	let (session, transport) = connect(false);
	let subscriber = Registry::default().with(HostLogLayer::new(&session));

	tracing::subscriber::with_default(subscriber, || {
		tracing::info!(target: "app", "before ready");
		transport.deliver_from_host(host::ready());
		tracing::warn!(target: "app", battery = 12, "low battery");
		tracing::trace!(target: "app", "frame rendered");
		tracing::debug!(target: "framelink_sdk::session", "internal");
	});

	let frames = transport.frames_for("CAPTURE_LOG");
	assert_eq!(frames.len(), 2);
	assert_eq!(frames[0]["args"], json!({"level": "warn", "message": "low battery battery=12"}));
	assert_eq!(frames[1]["args"], json!({"level": "log", "message": "frame rendered"}));
	// nobody waits for the replies
	assert_eq!(session.pending_commands(), 2);
}

#[test]
fn test_disabled_capture_stays_local() {
	let (session, transport) = connect(true);
	let subscriber = Registry::default().with(HostLogLayer::new(&session));

	tracing::subscriber::with_default(subscriber, || {
		transport.deliver_from_host(host::ready());
		tracing::error!(target: "app", "kept local");
	});

	assert!(session.is_ready());
	assert!(transport.frames_for("CAPTURE_LOG").is_empty());
}

#[test]
fn test_capture_stops_after_close() {
	let (session, transport) = connect(false);
	let subscriber = Registry::default().with(HostLogLayer::new(&session));

	tracing::subscriber::with_default(subscriber, || {
		transport.deliver_from_host(host::ready());
		session.close(1000, None);
		tracing::error!(target: "app", "after close");
	});

	assert!(transport.frames_for("CAPTURE_LOG").is_empty());
}

#[test]
fn test_layer_outliving_session_is_inert() {
	let (session, transport) = connect(false);
	transport.deliver_from_host(host::ready());
	let layer = HostLogLayer::new(&session);
	drop(session);

	tracing::subscriber::with_default(Registry::default().with(layer), || {
		tracing::info!(target: "app", "orphaned");
	});
	assert!(transport.frames_for("CAPTURE_LOG").is_empty());
}
