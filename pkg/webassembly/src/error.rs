// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Display;

use framelink_type::Error;
use js_sys::Reflect;
use wasm_bindgen::JsValue;

/// Conversions from Rust errors into JavaScript `Error` objects.
pub struct JsError;

impl JsError {
	pub fn from_error<E: Display>(err: &E) -> JsValue {
		Self::message(&err.to_string())
	}

	/// Like `from_error`, with the host's RPC code on the `code` property when there is one.
	pub fn from_session_error(err: &Error) -> JsValue {
		let value = Self::from_error(err);
		if let Some(code) = err.rpc_code() {
			let _ = Reflect::set(&value, &JsValue::from_str("code"), &JsValue::from_f64(code as f64));
		}
		value
	}

	pub fn message(message: &str) -> JsValue {
		js_sys::Error::new(message).into()
	}

	/// Best-effort text of a thrown JavaScript value.
	pub fn describe(value: &JsValue) -> String {
		value.as_string().unwrap_or_else(|| format!("{:?}", value))
	}
}
