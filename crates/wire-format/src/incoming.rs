// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use framelink_type::{Nonce, RpcError};
use serde::Deserialize;
use serde_json::Value;

use crate::{
	command::{Command, DISPATCH},
	envelope::{CloseFrame, HelloFrame},
	error::WireError,
	event::Event,
	opcode::Opcode,
};

/// A validated inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
	Handshake,
	Frame(IncomingFrame),
	Close(CloseFrame),
	Hello(HelloFrame),
}

impl Inbound {
	pub fn parse(data: Value) -> Result<Self, WireError> {
		let Value::Array(items) = data else {
			return Err(WireError::NotAnEnvelope);
		};
		let [opcode, payload]: [Value; 2] = items.try_into().map_err(|_| WireError::NotAnEnvelope)?;
		let code = opcode.as_i64().ok_or(WireError::NotAnEnvelope)?;
		let opcode = Opcode::from_code(code).ok_or(WireError::UnknownOpcode(code))?;

		match opcode {
			Opcode::Handshake => Ok(Inbound::Handshake),
			Opcode::Frame => IncomingFrame::parse(payload).map(Inbound::Frame),
			Opcode::Close => serde_json::from_value(payload)
				.map(Inbound::Close)
				.map_err(|err| WireError::malformed(Opcode::Close, err)),
			Opcode::Hello => serde_json::from_value(payload)
				.map(Inbound::Hello)
				.map_err(|err| WireError::malformed(Opcode::Hello, err)),
		}
	}
}

/// Payload of an inbound FRAME.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingFrame {
	/// Unsolicited event notification.
	Dispatch {
		event: Event,
		data: Value,
		nonce: Option<Nonce>,
	},
	/// Reply to a request.
	Response {
		cmd: Command,
		data: Value,
		nonce: Option<Nonce>,
	},
	/// `evt: "ERROR"`; correlated to a request when `nonce` is set.
	Error {
		cmd: String,
		error: RpcError,
		nonce: Option<Nonce>,
	},
}

#[derive(Deserialize)]
struct RawFrame {
	cmd: String,
	#[serde(default)]
	evt: Option<String>,
	#[serde(default)]
	nonce: Option<Nonce>,
	#[serde(default)]
	data: Value,
}

impl IncomingFrame {
	pub fn parse(payload: Value) -> Result<Self, WireError> {
		let raw: RawFrame = serde_json::from_value(payload).map_err(|err| WireError::malformed(Opcode::Frame, err))?;

		match raw.evt {
			Some(evt) if evt == Event::Error.as_str() => {
				let error = RpcError::deserialize(&raw.data).map_err(|source| WireError::InvalidEventData {
					event: Event::Error,
					source,
				})?;
				Ok(IncomingFrame::Error {
					cmd: raw.cmd,
					error,
					nonce: raw.nonce,
				})
			}
			Some(evt) => {
				if raw.cmd != DISPATCH {
					return Err(WireError::malformed(
						Opcode::Frame,
						format!("event frame `{evt}` has cmd `{}`", raw.cmd),
					));
				}
				let event = Event::from_wire(&evt).ok_or(WireError::UnknownEvent(evt))?;
				event.validate(&raw.data).map_err(|source| WireError::InvalidEventData {
					event,
					source,
				})?;
				Ok(IncomingFrame::Dispatch {
					event,
					data: raw.data,
					nonce: raw.nonce,
				})
			}
			None => {
				let cmd = Command::from_wire(&raw.cmd).ok_or(WireError::UnknownCommand(raw.cmd))?;
				Ok(IncomingFrame::Response {
					cmd,
					data: raw.data,
					nonce: raw.nonce,
				})
			}
		}
	}

	pub fn nonce(&self) -> Option<&Nonce> {
		match self {
			IncomingFrame::Dispatch {
				nonce,
				..
			}
			| IncomingFrame::Response {
				nonce,
				..
			}
			| IncomingFrame::Error {
				nonce,
				..
			} => nonce.as_ref(),
		}
	}
}
