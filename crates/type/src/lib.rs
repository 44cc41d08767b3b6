// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Leaf types shared by every framelink crate: the error taxonomy, the numeric
//! RPC/CLOSE codes used on the wire, the client platform and request nonces.

pub mod code;
pub mod error;
pub mod nonce;
pub mod platform;

pub use code::{CloseCode, RpcErrorCode};
pub use error::{Error, Result, RpcError};
pub use nonce::Nonce;
pub use platform::Platform;
