// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Entity shapes shared by event payloads and command responses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
	pub id: String,
	pub username: String,
	#[serde(default)]
	pub discriminator: Option<String>,
	#[serde(default)]
	pub global_name: Option<String>,
	#[serde(default)]
	pub avatar: Option<String>,
	#[serde(default)]
	pub public_flags: u64,
	#[serde(default)]
	pub flags: Option<u64>,
	#[serde(default)]
	pub premium_type: Option<u8>,
	#[serde(default)]
	pub bot: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
	#[serde(flatten)]
	pub user: User,
	#[serde(default)]
	pub nickname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceState {
	pub mute: bool,
	pub deaf: bool,
	pub self_mute: bool,
	pub self_deaf: bool,
	pub suppress: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pan {
	pub left: f64,
	pub right: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkuPrice {
	pub amount: u64,
	pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sku {
	pub id: String,
	pub name: String,
	#[serde(rename = "type")]
	pub kind: i32,
	pub price: SkuPrice,
	pub application_id: String,
	#[serde(default)]
	pub flags: u64,
	#[serde(default)]
	pub release_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
	pub id: String,
	pub sku_id: String,
	pub application_id: String,
	pub user_id: String,
	#[serde(rename = "type")]
	pub kind: i32,
	#[serde(default)]
	pub gift_code_flags: u64,
	#[serde(default)]
	pub deleted: bool,
	#[serde(default)]
	pub starts_at: Option<String>,
	#[serde(default)]
	pub ends_at: Option<String>,
}
