// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use framelink_sdk::{
	Session,
	command::{
		AuthorizeArgs, CaptureLogLevel, SetConfigArgs, SetOrientationLockStateArgs, ShareLinkArgs,
		StartPurchaseArgs,
	},
};
use framelink_testing::{MockTransport, host};
use framelink_type::{Error, RpcErrorCode};
use framelink_wire_format::Command;
use serde_json::{Value, json};

fn ready_session() -> (Session<MockTransport>, MockTransport) {
	let transport = MockTransport::new();
	let session = Session::connect(host::config(), host::location(), transport.clone()).unwrap();
	transport.deliver_from_host(host::ready());
	(session, transport)
}

/// Answer every FRAME with `data`.
fn reply_with(transport: &MockTransport, data: Value) {
	transport.respond_with(move |message| {
		let frame = &message[1];
		match (frame["cmd"].as_str(), frame["nonce"].as_str()) {
			(Some(cmd), Some(nonce)) => vec![host::response(cmd, nonce, data.clone())],
			_ => Vec::new(),
		}
	});
}

#[tokio::test]
async fn test_get_skus() {
	let (session, transport) = ready_session();

	let commands = session.commands();
	let (result, _) = tokio::join!(commands.get_skus(), async {
		assert_eq!(session.pending_commands(), 1);
		let frame = transport.last_frame().unwrap();
		assert_eq!(frame["cmd"], "GET_SKUS_EMBEDDED");
		assert!(frame.get("args").is_none());
		let nonce = frame["nonce"].as_str().unwrap();
		transport.deliver_from_host(host::response("GET_SKUS_EMBEDDED", nonce, json!({"skus": []})));
	});

	assert!(result.unwrap().skus.is_empty());
	assert_eq!(session.pending_commands(), 0);
}

#[tokio::test]
async fn test_response_failing_validation() {
	let (session, transport) = ready_session();
	reply_with(&transport, json!({"skus": "none"}));

	let err = session.commands().get_skus().await.unwrap_err();
	assert!(matches!(err, Error::Validation { ref command, .. } if command == "GET_SKUS_EMBEDDED"));
}

#[tokio::test]
async fn test_authorize() {
	let (session, transport) = ready_session();
	reply_with(&transport, json!({"code": "oauth-code"}));

	let args = AuthorizeArgs {
		client_id: host::CLIENT_ID.to_string(),
		scope: vec!["identify".to_string(), "guilds".to_string()],
		response_type: Some("code".to_string()),
		prompt: Some("none".to_string()),
		..Default::default()
	};
	let response = session.commands().authorize(&args).await.unwrap();
	assert_eq!(response.code, "oauth-code");

	let frame = transport.frames_for("AUTHORIZE").pop().unwrap();
	assert_eq!(
		frame["args"],
		json!({"client_id": host::CLIENT_ID, "scope": ["identify", "guilds"], "response_type": "code", "prompt": "none"})
	);
}

#[tokio::test]
async fn test_authenticate() {
	let (session, transport) = ready_session();
	reply_with(
		&transport,
		json!({
			"access_token": "token",
			"user": {"id": "1", "username": "alice"},
			"scopes": ["identify"],
			"expires": "2026-01-01T00:00:00Z",
			"application": {"id": "app", "name": "Snake"},
		}),
	);

	let args = framelink_sdk::command::AuthenticateArgs {
		access_token: Some("token".to_string()),
	};
	let response = session.commands().authenticate(&args).await.unwrap();
	assert_eq!(response.user.username, "alice");
	assert_eq!(response.application.name, "Snake");
}

#[tokio::test]
async fn test_get_channel_args() {
	let (session, transport) = ready_session();
	reply_with(&transport, json!({"id": "c1", "type": 2, "guild_id": "g1", "name": "General"}));

	let channel = session.commands().get_channel("c1").await.unwrap();
	assert_eq!(channel.kind, 2);
	assert_eq!(channel.name.as_deref(), Some("General"));
	assert_eq!(transport.last_frame().unwrap()["args"], json!({"channel_id": "c1"}));
}

#[tokio::test]
async fn test_orientation_lock_falls_back_on_invalid_payload() {
	let (session, transport) = ready_session();
	let attempts = Arc::new(AtomicUsize::new(0));
	let counter = attempts.clone();
	transport.respond_with(move |message| {
		let frame = &message[1];
		let Some(nonce) = frame["nonce"].as_str() else {
			return Vec::new();
		};
		counter.fetch_add(1, Ordering::SeqCst);
		if frame["args"].get("grid_lock_state").is_some() {
			vec![host::error("SET_ORIENTATION_LOCK_STATE", Some(nonce), 4000, "unknown field")]
		} else {
			vec![host::response("SET_ORIENTATION_LOCK_STATE", nonce, Value::Null)]
		}
	});

	let args = SetOrientationLockStateArgs {
		lock_state: 2,
		picture_in_picture_lock_state: Some(3),
		grid_lock_state: Some(1),
	};
	session.commands().set_orientation_lock_state(args).await.unwrap();

	assert_eq!(attempts.load(Ordering::SeqCst), 2);
	let frames = transport.frames_for("SET_ORIENTATION_LOCK_STATE");
	assert_eq!(frames[0]["args"], json!({"lock_state": 2, "picture_in_picture_lock_state": 3, "grid_lock_state": 1}));
	assert_eq!(frames[1]["args"], json!({"lock_state": 2, "picture_in_picture_lock_state": 3}));
	assert_ne!(frames[0]["nonce"], frames[1]["nonce"]);
}

#[tokio::test]
async fn test_orientation_lock_other_errors_do_not_retry() {
	let (session, transport) = ready_session();
	transport.respond_with(|message| {
		let nonce = message[1]["nonce"].as_str().unwrap_or_default();
		vec![host::error("SET_ORIENTATION_LOCK_STATE", Some(nonce), 4006, "denied")]
	});

	let err = session
		.commands()
		.set_orientation_lock_state(SetOrientationLockStateArgs {
			lock_state: 1,
			..Default::default()
		})
		.await
		.unwrap_err();
	assert_eq!(err.rpc_code(), Some(RpcErrorCode::InvalidPermissions.code()));
	assert_eq!(transport.frames_for("SET_ORIENTATION_LOCK_STATE").len(), 1);
}

#[tokio::test]
async fn test_empty_responses() {
	let (session, transport) = ready_session();
	reply_with(&transport, Value::Null);

	session.commands().open_invite_dialog().await.unwrap();
	session.commands().open_share_moment_dialog("https://cdn.example/clip.png").await.unwrap();
	assert_eq!(session.commands().open_external_link("https://example.com").await.unwrap().opened, None);
	let purchase = StartPurchaseArgs {
		sku_id: "sku".to_string(),
		pid: None,
	};
	assert_eq!(session.commands().start_purchase(&purchase).await.unwrap(), None);

	assert_eq!(
		transport.frames_for("OPEN_SHARE_MOMENT_DIALOG")[0]["args"],
		json!({"mediaUrl": "https://cdn.example/clip.png"})
	);
}

#[tokio::test]
async fn test_capture_log_args() {
	let (session, transport) = ready_session();
	reply_with(&transport, json!({}));

	session.commands().capture_log(CaptureLogLevel::Warn, "low battery").await.unwrap();
	let frame = transport.frames_for("CAPTURE_LOG").pop().unwrap();
	assert_eq!(frame["args"], json!({"level": "warn", "message": "low battery"}));
}

#[tokio::test]
async fn test_simple_queries() {
	let (session, transport) = ready_session();

	reply_with(&transport, json!({"use_interactive_pip": true}));
	let config = session
		.commands()
		.set_config(SetConfigArgs {
			use_interactive_pip: true,
		})
		.await
		.unwrap();
	assert!(config.use_interactive_pip);

	reply_with(&transport, json!({"locale": "en-US"}));
	assert_eq!(session.commands().user_settings_get_locale().await.unwrap().locale, "en-US");

	reply_with(&transport, json!({"iosKeyboardResizesView": true}));
	assert_eq!(session.commands().get_platform_behaviors().await.unwrap().ios_keyboard_resizes_view, Some(true));

	reply_with(&transport, json!({"enabled": false}));
	assert!(!session.commands().encourage_hardware_acceleration().await.unwrap().enabled);

	reply_with(&transport, json!({"participants": [{"id": "1", "username": "alice", "nickname": "al"}]}));
	let participants = session.commands().get_instance_connected_participants().await.unwrap().participants;
	assert_eq!(participants[0].nickname.as_deref(), Some("al"));

	reply_with(&transport, json!({"entitlements": []}));
	assert!(session.commands().get_entitlements().await.unwrap().entitlements.is_empty());

	reply_with(&transport, json!({"success": true, "didCopyLink": true}));
	let shared = session
		.commands()
		.share_link(&ShareLinkArgs {
			message: "join me".to_string(),
			..Default::default()
		})
		.await
		.unwrap();
	assert!(shared.success);
	assert_eq!(shared.did_copy_link, Some(true));

	reply_with(&transport, json!({"state": "playing"}));
	let activity = session.commands().set_activity(json!({"state": "playing"})).await.unwrap();
	assert_eq!(activity, json!({"state": "playing"}));
	assert_eq!(transport.frames_for("SET_ACTIVITY")[0]["args"], json!({"activity": {"state": "playing"}}));
}

#[tokio::test]
async fn test_generic_call() {
	let (session, transport) = ready_session();
	reply_with(&transport, json!({"anything": 1}));

	let data: Value = session.commands().call(Command::GetPlatformBehaviors, Some(json!({"x": 1}))).await.unwrap();
	assert_eq!(data, json!({"anything": 1}));
}

#[tokio::test]
async fn test_command_after_close() {
	let (session, _transport) = ready_session();
	session.close(1000, None);
	assert_eq!(session.commands().get_skus().await.unwrap_err(), Error::Closed);
}
