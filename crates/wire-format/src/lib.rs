// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Wire format for the cross-window session protocol.
//!
//! Every message is a two element array `[opcode, payload]`. This crate turns
//! outbound values into that shape and is the single place where untyped
//! inbound data becomes typed values; anything it rejects is dropped by the
//! session.

#[macro_use]
mod r#macro;

pub mod command;
pub mod envelope;
pub mod error;
pub mod event;
pub mod incoming;
pub mod model;
pub mod opcode;

pub use command::Command;
pub use envelope::{CloseFrame, Envelope, Handshake, HelloFrame, RequestFrame};
pub use error::WireError;
pub use event::Event;
pub use incoming::{Inbound, IncomingFrame};
pub use opcode::Opcode;

/// Protocol version sent in the handshake.
pub const PROTOCOL_VERSION: u32 = 1;

/// Payload encoding announced in the handshake.
pub const ENCODING_JSON: &str = "json";
