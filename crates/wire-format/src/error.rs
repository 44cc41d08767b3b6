// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{event::Event, opcode::Opcode};

/// Reasons an inbound message is rejected by the codec.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
	#[error("message is not a two element [opcode, payload] array")]
	NotAnEnvelope,

	#[error("unknown opcode {0}")]
	UnknownOpcode(i64),

	#[error("malformed {opcode} payload: {reason}")]
	MalformedPayload {
		opcode: Opcode,
		reason: String,
	},

	#[error("unknown event `{0}`")]
	UnknownEvent(String),

	#[error("unknown command `{0}`")]
	UnknownCommand(String),

	#[error("{event} payload does not match its shape: {source}")]
	InvalidEventData {
		event: Event,
		#[source]
		source: serde_json::Error,
	},
}

impl WireError {
	pub(crate) fn malformed(opcode: Opcode, reason: impl ToString) -> Self {
		WireError::MalformedPayload {
			opcode,
			reason: reason.to_string(),
		}
	}
}
