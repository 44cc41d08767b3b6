// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::code::RpcErrorCode;

pub type Result<T> = std::result::Result<T, Error>;

/// Error body carried by an `evt: "ERROR"` frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("rpc error {code}{}", .message.as_ref().map(|message| format!(": {message}")).unwrap_or_default())]
pub struct RpcError {
	pub code: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

impl RpcError {
	pub fn new(code: i64, message: impl Into<String>) -> Self {
		Self {
			code,
			message: Some(message.into()),
		}
	}

	pub fn is(&self, code: RpcErrorCode) -> bool {
		self.code == code.code()
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("{0} query param is not defined")]
	MissingQueryParam(&'static str),

	#[error("invalid platform: {0}")]
	InvalidPlatform(String),

	#[error("invalid query string: {0}")]
	InvalidQuery(String),

	#[error(transparent)]
	Rpc(#[from] RpcError),

	#[error("response to {command} failed validation: {reason}")]
	Validation {
		command: String,
		reason: String,
	},

	#[error("failed to encode arguments: {0}")]
	Encode(String),

	#[error("transport error: {0}")]
	Transport(String),

	#[error("session closed")]
	Closed,
}

impl Error {
	/// The host's numeric code when this is a correlated protocol error.
	pub fn rpc_code(&self) -> Option<i64> {
		match self {
			Error::Rpc(err) => Some(err.code),
			_ => None,
		}
	}

	pub fn is_construction(&self) -> bool {
		matches!(self, Error::MissingQueryParam(_) | Error::InvalidPlatform(_) | Error::InvalidQuery(_))
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Encode(err.to_string())
	}
}
