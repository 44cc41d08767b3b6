// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

/// Error codes the host puts in the `code` field of an ERROR frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcErrorCode {
	UnknownError,
	InvalidPayload,
	InvalidCommand,
	InvalidGuild,
	InvalidEvent,
	InvalidChannel,
	InvalidPermissions,
	InvalidClientId,
	InvalidOrigin,
	InvalidToken,
	InvalidUser,
	OAuth2Error,
}

impl RpcErrorCode {
	pub const fn code(self) -> i64 {
		match self {
			RpcErrorCode::UnknownError => 1000,
			RpcErrorCode::InvalidPayload => 4000,
			RpcErrorCode::InvalidCommand => 4002,
			RpcErrorCode::InvalidGuild => 4003,
			RpcErrorCode::InvalidEvent => 4004,
			RpcErrorCode::InvalidChannel => 4005,
			RpcErrorCode::InvalidPermissions => 4006,
			RpcErrorCode::InvalidClientId => 4007,
			RpcErrorCode::InvalidOrigin => 4008,
			RpcErrorCode::InvalidToken => 4009,
			RpcErrorCode::InvalidUser => 4010,
			RpcErrorCode::OAuth2Error => 5000,
		}
	}

	pub fn from_code(code: i64) -> Option<Self> {
		let code = match code {
			1000 => RpcErrorCode::UnknownError,
			4000 => RpcErrorCode::InvalidPayload,
			4002 => RpcErrorCode::InvalidCommand,
			4003 => RpcErrorCode::InvalidGuild,
			4004 => RpcErrorCode::InvalidEvent,
			4005 => RpcErrorCode::InvalidChannel,
			4006 => RpcErrorCode::InvalidPermissions,
			4007 => RpcErrorCode::InvalidClientId,
			4008 => RpcErrorCode::InvalidOrigin,
			4009 => RpcErrorCode::InvalidToken,
			4010 => RpcErrorCode::InvalidUser,
			5000 => RpcErrorCode::OAuth2Error,
			_ => return None,
		};
		Some(code)
	}
}

impl Display for RpcErrorCode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let name = match self {
			RpcErrorCode::UnknownError => "UNKNOWN_ERROR",
			RpcErrorCode::InvalidPayload => "INVALID_PAYLOAD",
			RpcErrorCode::InvalidCommand => "INVALID_COMMAND",
			RpcErrorCode::InvalidGuild => "INVALID_GUILD",
			RpcErrorCode::InvalidEvent => "INVALID_EVENT",
			RpcErrorCode::InvalidChannel => "INVALID_CHANNEL",
			RpcErrorCode::InvalidPermissions => "INVALID_PERMISSIONS",
			RpcErrorCode::InvalidClientId => "INVALID_CLIENTID",
			RpcErrorCode::InvalidOrigin => "INVALID_ORIGIN",
			RpcErrorCode::InvalidToken => "INVALID_TOKEN",
			RpcErrorCode::InvalidUser => "INVALID_USER",
			RpcErrorCode::OAuth2Error => "OAUTH2_ERROR",
		};
		f.write_str(name)
	}
}

/// Codes carried by a CLOSE envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseCode {
	Normal,
	Unsupported,
	Abnormal,
	InvalidClientId,
	InvalidOrigin,
	RateLimited,
	TokenRevoked,
	InvalidVersion,
	InvalidEncoding,
}

impl CloseCode {
	pub const fn code(self) -> i64 {
		match self {
			CloseCode::Normal => 1000,
			CloseCode::Unsupported => 1003,
			CloseCode::Abnormal => 1006,
			CloseCode::InvalidClientId => 4000,
			CloseCode::InvalidOrigin => 4001,
			CloseCode::RateLimited => 4002,
			CloseCode::TokenRevoked => 4003,
			CloseCode::InvalidVersion => 4004,
			CloseCode::InvalidEncoding => 4005,
		}
	}
}

impl From<CloseCode> for i64 {
	fn from(code: CloseCode) -> Self {
		code.code()
	}
}
