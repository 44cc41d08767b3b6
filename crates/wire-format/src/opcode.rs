// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

/// Structural kind of an envelope, sent as the first tuple element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
	Handshake = 0,
	Frame = 1,
	Close = 2,
	Hello = 3,
}

impl Opcode {
	pub fn from_code(code: i64) -> Option<Self> {
		match code {
			0 => Some(Opcode::Handshake),
			1 => Some(Opcode::Frame),
			2 => Some(Opcode::Close),
			3 => Some(Opcode::Hello),
			_ => None,
		}
	}

	pub fn code(self) -> u8 {
		self as u8
	}
}

impl Display for Opcode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Opcode::Handshake => f.write_str("HANDSHAKE"),
			Opcode::Frame => f.write_str("FRAME"),
			Opcode::Close => f.write_str("CLOSE"),
			Opcode::Hello => f.write_str("HELLO"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_opcode_codes() {
		assert_eq!(Opcode::from_code(0), Some(Opcode::Handshake));
		assert_eq!(Opcode::from_code(3), Some(Opcode::Hello));
		assert_eq!(Opcode::from_code(4), None);
		assert_eq!(Opcode::from_code(-1), None);
		assert_eq!(Opcode::Close.code(), 2);
	}
}
