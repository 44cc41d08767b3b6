// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Argument and response shapes of the typed commands.

use framelink_wire_format::model::{Application, Entitlement, Participant, Sku, User};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of commands whose reply carries nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Empty {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizeArgs {
	pub client_id: String,
	pub scope: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub response_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub prompt: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code_challenge: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code_challenge_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizeResponse {
	pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthenticateArgs {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticateResponse {
	pub access_token: String,
	pub user: User,
	pub scopes: Vec<String>,
	pub expires: String,
	pub application: Application,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: i32,
	#[serde(default)]
	pub guild_id: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub topic: Option<String>,
	#[serde(default)]
	pub bitrate: Option<u64>,
	#[serde(default)]
	pub user_limit: Option<u64>,
	#[serde(default)]
	pub position: Option<i64>,
	#[serde(default)]
	pub voice_states: Vec<Value>,
	#[serde(default)]
	pub messages: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetActivityArgs {
	pub activity: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSkusResponse {
	pub skus: Vec<Sku>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetEntitlementsResponse {
	pub entitlements: Vec<Entitlement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartPurchaseArgs {
	pub sku_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pid: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetConfigArgs {
	pub use_interactive_pip: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetConfigResponse {
	pub use_interactive_pip: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenExternalLinkResponse {
	#[serde(default)]
	pub opened: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncourageHardwareAccelerationResponse {
	pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureLogLevel {
	Log,
	Warn,
	Debug,
	Info,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureLogArgs {
	pub level: CaptureLogLevel,
	pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOrientationLockStateArgs {
	pub lock_state: i32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub picture_in_picture_lock_state: Option<i32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub grid_lock_state: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleResponse {
	pub locale: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformBehaviors {
	#[serde(default, rename = "iosKeyboardResizesView")]
	pub ios_keyboard_resizes_view: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedParticipantsResponse {
	pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenShareMomentDialogArgs {
	#[serde(rename = "mediaUrl")]
	pub media_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinkArgs {
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub custom_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub link_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinkResponse {
	pub success: bool,
	#[serde(default, rename = "didCopyLink")]
	pub did_copy_link: Option<bool>,
	#[serde(default, rename = "didSendMessage")]
	pub did_send_message: Option<bool>,
}
