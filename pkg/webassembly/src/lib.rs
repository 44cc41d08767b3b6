// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! WebAssembly bindings for framelink
//!
//! Provides a [`WindowTransport`] over `window.postMessage` for Rust apps
//! compiled to wasm32, and a [`WasmSession`] class for JavaScript callers.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use framelink_sdk::{CommandRequest, HostLogLayer, ListenerId, SdkConfig, Session};
use framelink_wire_format::{Command, Event};
use js_sys::{Function, Promise};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

mod error;
mod transport;

pub use error::JsError;
pub use transport::{WindowTransport, from_js, page_location, to_js};

/// JavaScript listener registered on the event bus.
struct JsCallback(Function);

// SAFETY: see WindowTransport; wasm32 without atomics is single threaded.
#[cfg(not(target_feature = "atomics"))]
unsafe impl Send for JsCallback {}
#[cfg(not(target_feature = "atomics"))]
unsafe impl Sync for JsCallback {}

impl JsCallback {
	fn call(&self, data: &Value) {
		let result = to_js(data)
			.map_err(|err| JsError::from_error(&err))
			.and_then(|data| self.0.call1(&JsValue::NULL, &data));
		if let Err(err) = result {
			tracing::warn!("Event listener threw: {}", JsError::describe(&err));
		}
	}
}

#[derive(Default)]
struct Subscriptions {
	next: u32,
	active: HashMap<u32, (Event, ListenerId)>,
}

/// Embedded-app session for JavaScript callers
///
/// Reads its identity from the page's query string and talks to the host
/// window through `postMessage`.
#[wasm_bindgen]
pub struct WasmSession {
	inner: Session<WindowTransport>,
	subscriptions: Rc<RefCell<Subscriptions>>,
}

#[wasm_bindgen]
impl WasmSession {
	/// Create the session and send the handshake
	///
	/// # Example
	///
	/// ```javascript
	/// import init, { WasmSession } from './pkg/framelink_webassembly.js';
	///
	/// await init();
	/// const session = new WasmSession("1234567890");
	/// await session.ready();
	/// ```
	#[wasm_bindgen(constructor)]
	pub fn new(client_id: &str, disable_console_log_override: Option<bool>) -> Result<WasmSession, JsValue> {
		#[cfg(feature = "console_error_panic_hook")]
		console_error_panic_hook::set_once();

		let window = web_sys::window().ok_or_else(|| JsError::message("no global window"))?;
		let location = page_location(&window).map_err(|e| JsError::from_session_error(&e))?;
		let transport = WindowTransport::new(window).map_err(|e| JsError::from_session_error(&e))?;
		let config =
			SdkConfig::new(client_id).disable_console_log_override(disable_console_log_override.unwrap_or(false));

		let inner = Session::connect(config, location, transport).map_err(|e| JsError::from_session_error(&e))?;
		Ok(WasmSession {
			inner,
			subscriptions: Rc::default(),
		})
	}

	/// Resolves once the host is ready
	pub fn ready(&self) -> Promise {
		let session = self.inner.clone();
		future_to_promise(async move {
			session.ready().await.map_err(|e| JsError::from_session_error(&e))?;
			Ok(JsValue::UNDEFINED)
		})
	}

	/// Send a raw command and resolve with the reply's data
	///
	/// ```javascript
	/// const { skus } = await session.sendCommand("GET_SKUS_EMBEDDED");
	/// ```
	#[wasm_bindgen(js_name = sendCommand)]
	pub fn send_command(&self, cmd: &str, args: JsValue) -> Result<Promise, JsValue> {
		let cmd = Command::from_wire(cmd).ok_or_else(|| JsError::message(&format!("unknown command {}", cmd)))?;
		let args = optional(args)?;
		let reply =
			self.inner.send_command(CommandRequest::new(cmd, args)).map_err(|e| JsError::from_session_error(&e))?;

		Ok(future_to_promise(async move {
			let data = reply.await.map_err(|e| JsError::from_session_error(&e))?;
			to_js(&data).map_err(|e| JsError::from_error(&e))
		}))
	}

	/// Subscribe `listener` to `event`; resolves with a handle for `unsubscribe`
	pub fn subscribe(&self, event: &str, listener: Function, args: JsValue) -> Result<Promise, JsValue> {
		let event = parse_event(event)?;
		let args = optional(args)?;
		let session = self.inner.clone();
		let subscriptions = self.subscriptions.clone();
		let callback = JsCallback(listener);

		Ok(future_to_promise(async move {
			let id = session
				.subscribe(event, move |data| callback.call(data), args)
				.await
				.map_err(|e| JsError::from_session_error(&e))?;

			let mut subscriptions = subscriptions.borrow_mut();
			let handle = subscriptions.next;
			subscriptions.next += 1;
			subscriptions.active.insert(handle, (event, id));
			Ok(JsValue::from(handle))
		}))
	}

	/// Remove the listener behind `handle`; the last one for an event also unsubscribes on the host
	pub fn unsubscribe(&self, handle: u32) -> Promise {
		let removed = self.subscriptions.borrow_mut().active.remove(&handle);
		let session = self.inner.clone();
		future_to_promise(async move {
			let Some((event, id)) = removed else {
				return Ok(JsValue::FALSE);
			};
			session.unsubscribe(event, id, None).await.map_err(|e| JsError::from_session_error(&e))?;
			Ok(JsValue::TRUE)
		})
	}

	/// Forward this module's `tracing` output to the host once ready
	#[wasm_bindgen(js_name = captureLogs)]
	pub fn capture_logs(&self) -> Result<(), JsValue> {
		tracing_subscriber::registry()
			.with(HostLogLayer::new(&self.inner))
			.try_init()
			.map_err(|e| JsError::from_error(&e))
	}

	pub fn close(&self, code: i32, message: Option<String>) {
		self.inner.close(code, message.as_deref());
	}

	#[wasm_bindgen(getter, js_name = isReady)]
	pub fn is_ready(&self) -> bool {
		self.inner.is_ready()
	}

	#[wasm_bindgen(getter, js_name = clientId)]
	pub fn client_id(&self) -> String {
		self.inner.config().client_id.clone()
	}

	#[wasm_bindgen(getter, js_name = frameId)]
	pub fn frame_id(&self) -> String {
		self.inner.identity().frame_id.clone()
	}

	#[wasm_bindgen(getter, js_name = instanceId)]
	pub fn instance_id(&self) -> String {
		self.inner.identity().instance_id.clone()
	}

	#[wasm_bindgen(getter)]
	pub fn platform(&self) -> String {
		self.inner.identity().platform.to_string()
	}

	#[wasm_bindgen(getter, js_name = guildId)]
	pub fn guild_id(&self) -> Option<String> {
		self.inner.identity().guild_id.clone()
	}

	#[wasm_bindgen(getter, js_name = channelId)]
	pub fn channel_id(&self) -> Option<String> {
		self.inner.identity().channel_id.clone()
	}

	#[wasm_bindgen(getter, js_name = customId)]
	pub fn custom_id(&self) -> Option<String> {
		self.inner.identity().custom_id.clone()
	}

	#[wasm_bindgen(getter, js_name = referrerId)]
	pub fn referrer_id(&self) -> Option<String> {
		self.inner.identity().referrer_id.clone()
	}

	#[wasm_bindgen(getter, js_name = locationId)]
	pub fn location_id(&self) -> Option<String> {
		self.inner.identity().location_id.clone()
	}

	#[wasm_bindgen(getter, js_name = mobileAppVersion)]
	pub fn mobile_app_version(&self) -> Option<String> {
		self.inner.identity().mobile_app_version.clone()
	}
}

fn parse_event(event: &str) -> Result<Event, JsValue> {
	Event::from_wire(event).ok_or_else(|| JsError::message(&format!("unknown event {}", event)))
}

fn optional(args: JsValue) -> Result<Option<Value>, JsValue> {
	if args.is_undefined() || args.is_null() {
		return Ok(None);
	}
	from_js(args).map(Some).map_err(|e| JsError::from_error(&e))
}
