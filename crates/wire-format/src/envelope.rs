// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use framelink_type::{Nonce, Platform};
use serde::{Deserialize, Serialize, Serializer, ser::SerializeTuple};
use serde_json::Value;

use crate::{command::Command, event::Event, opcode::Opcode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handshake {
	pub v: u32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub encoding: Option<String>,
	pub client_id: String,
	pub frame_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sdk_version: Option<String>,
}

/// Outbound command request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestFrame {
	pub cmd: Command,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub args: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub evt: Option<Event>,
	pub nonce: Nonce,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseFrame {
	pub code: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub nonce: Option<Nonce>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelloFrame {
	pub frame_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub platform: Option<Platform>,
}

/// Outbound message, serialized as `[opcode, payload]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
	Handshake(Handshake),
	Frame(RequestFrame),
	Close(CloseFrame),
	Hello(HelloFrame),
}

impl Envelope {
	pub fn opcode(&self) -> Opcode {
		match self {
			Envelope::Handshake(_) => Opcode::Handshake,
			Envelope::Frame(_) => Opcode::Frame,
			Envelope::Close(_) => Opcode::Close,
			Envelope::Hello(_) => Opcode::Hello,
		}
	}

	pub fn to_value(&self) -> Result<Value, serde_json::Error> {
		serde_json::to_value(self)
	}
}

impl Serialize for Envelope {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut tuple = serializer.serialize_tuple(2)?;
		tuple.serialize_element(&self.opcode().code())?;
		match self {
			Envelope::Handshake(payload) => tuple.serialize_element(payload)?,
			Envelope::Frame(payload) => tuple.serialize_element(payload)?,
			Envelope::Close(payload) => tuple.serialize_element(payload)?,
			Envelope::Hello(payload) => tuple.serialize_element(payload)?,
		}
		tuple.end()
	}
}
