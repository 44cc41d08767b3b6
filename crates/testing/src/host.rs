// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Messages as the host would post them.

use framelink_sdk::{PageLocation, SdkConfig};
use serde_json::{Value, json};

pub const HOST_ORIGIN: &str = "https://discord.com";
pub const APP_ORIGIN: &str = "https://app.example";
pub const FOREIGN_ORIGIN: &str = "https://evil.example";
pub const CLIENT_ID: &str = "1234567890";

pub const DESKTOP_QUERY: &str = "?frame_id=frame&instance_id=instance&platform=desktop";

pub fn config() -> SdkConfig {
	SdkConfig::new(CLIENT_ID)
}

pub fn location() -> PageLocation {
	PageLocation::new(APP_ORIGIN, DESKTOP_QUERY).with_referrer(HOST_ORIGIN)
}

pub fn mobile_location(mobile_app_version: Option<&str>) -> PageLocation {
	let mut query = "?frame_id=frame&instance_id=instance&platform=mobile".to_string();
	if let Some(version) = mobile_app_version {
		query.push_str("&mobile_app_version=");
		query.push_str(version);
	}
	PageLocation::new(APP_ORIGIN, query).with_referrer(HOST_ORIGIN)
}

pub fn dispatch(evt: &str, data: Value) -> Value {
	json!([1, {"cmd": "DISPATCH", "evt": evt, "data": data, "nonce": null}])
}

pub fn ready() -> Value {
	dispatch(
		"READY",
		json!({
			"v": 1,
			"config": {"cdn_host": "cdn.discordapp.com", "api_endpoint": "//discord.com/api", "environment": "production"},
		}),
	)
}

pub fn response(cmd: &str, nonce: &str, data: Value) -> Value {
	json!([1, {"cmd": cmd, "evt": null, "data": data, "nonce": nonce}])
}

pub fn error(cmd: &str, nonce: Option<&str>, code: i64, message: &str) -> Value {
	json!([1, {"cmd": cmd, "evt": "ERROR", "data": {"code": code, "message": message}, "nonce": nonce}])
}

pub fn close(code: i64, message: &str) -> Value {
	json!([2, {"code": code, "message": message}])
}

pub fn hello(frame_id: &str) -> Value {
	json!([3, {"frame_id": frame_id, "platform": "desktop"}])
}
