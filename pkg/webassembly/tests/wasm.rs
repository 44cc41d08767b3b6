// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! WASM integration tests
//!
//! Run with: wasm-pack test --headless --chrome

use std::sync::{Arc, Mutex};

use framelink_sdk::Transport;
use framelink_webassembly::{WasmSession, WindowTransport, from_js, page_location, to_js};
use serde_json::json;
use tokio::sync::oneshot;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_values_cross_the_boundary() {
	let value = json!([1, {"cmd": "DISPATCH", "evt": "READY", "data": {"v": 1, "list": [1, 2.5, null]}, "nonce": null}]);
	let js = to_js(&value).unwrap();
	assert!(js.is_object());
	assert_eq!(from_js(js).unwrap(), value);
}

#[wasm_bindgen_test]
fn test_page_location() {
	let window = web_sys::window().unwrap();
	let location = page_location(&window).unwrap();
	assert_eq!(location.origin, window.location().origin().unwrap());
}

#[wasm_bindgen_test]
fn test_session_requires_identity_query() {
	// the test runner page carries no frame_id
	let err = WasmSession::new("1234567890", None).err().unwrap();
	let message = js_sys::Error::from(err).message();
	assert_eq!(String::from(message), "frame_id query param is not defined");
}

#[wasm_bindgen_test]
async fn test_window_transport_roundtrip() {
	let window = web_sys::window().unwrap();
	let transport = WindowTransport::with_target(window.clone(), window.clone());

	let (tx, rx) = oneshot::channel();
	let tx = Mutex::new(Some(tx));
	let seen = Arc::new(Mutex::new(0));
	let counter = seen.clone();
	transport
		.listen(Arc::new(move |origin: &str, data: serde_json::Value| {
			*counter.lock().unwrap() += 1;
			if let Some(tx) = tx.lock().unwrap().take() {
				let _ = tx.send((origin.to_string(), data));
			}
		}))
		.unwrap();

	transport.post(json!([3, {"frame_id": "f1"}]), "*").unwrap();
	let (origin, data) = rx.await.unwrap();
	assert_eq!(origin, window.location().origin().unwrap());
	assert_eq!(data, json!([3, {"frame_id": "f1"}]));

	transport.unlisten();
	assert_eq!(*seen.lock().unwrap(), 1);
}
