// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cell::RefCell;

use framelink_sdk::{InboundHandler, PageLocation, Transport};
use framelink_type::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{MessageEvent, Window};

use crate::error::JsError;

/// [`Transport`] over `window.postMessage`.
///
/// Inbound messages are taken from the page's own `message` events; outbound
/// messages go to the host window, which is the parent's opener when there
/// is one and the parent otherwise.
pub struct WindowTransport {
	window: Window,
	target: Window,
	listener: RefCell<Option<Closure<dyn FnMut(MessageEvent)>>>,
}

// SAFETY: without the atomics target feature wasm32 runs a single thread, so
// the JS handles are never touched from another thread.
#[cfg(not(target_feature = "atomics"))]
unsafe impl Send for WindowTransport {}
#[cfg(not(target_feature = "atomics"))]
unsafe impl Sync for WindowTransport {}

impl WindowTransport {
	pub fn new(window: Window) -> Result<Self> {
		let target = host_window(&window)?;
		Ok(Self::with_target(window, target))
	}

	pub fn with_target(window: Window, target: Window) -> Self {
		Self {
			window,
			target,
			listener: RefCell::new(None),
		}
	}

	pub fn window(&self) -> &Window {
		&self.window
	}
}

impl Transport for WindowTransport {
	fn listen(&self, handler: InboundHandler) -> Result<()> {
		self.unlisten();

		let callback = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
			let origin = event.origin();
			match from_js(event.data()) {
				Ok(data) => handler(&origin, data),
				Err(err) => tracing::trace!("Ignoring undecodable message from {}: {}", origin, err),
			}
		});
		self.window
			.add_event_listener_with_callback("message", callback.as_ref().unchecked_ref())
			.map_err(|err| Error::Transport(JsError::describe(&err)))?;
		*self.listener.borrow_mut() = Some(callback);
		Ok(())
	}

	fn post(&self, message: Value, target_origin: &str) -> Result<()> {
		let message = to_js(&message)?;
		self.target.post_message(&message, target_origin).map_err(|err| Error::Transport(JsError::describe(&err)))
	}

	fn unlisten(&self) {
		let Some(callback) = self.listener.borrow_mut().take() else {
			return;
		};
		if let Err(err) = self.window.remove_event_listener_with_callback("message", callback.as_ref().unchecked_ref())
		{
			tracing::warn!("Failed to remove message listener: {}", JsError::describe(&err));
		}
	}
}

impl Drop for WindowTransport {
	fn drop(&mut self) {
		self.unlisten();
	}
}

fn host_window(window: &Window) -> Result<Window> {
	let parent = window
		.parent()
		.map_err(|err| Error::Transport(JsError::describe(&err)))?
		.ok_or_else(|| Error::Transport("page has no parent window".to_string()))?;
	let opener = parent.opener().unwrap_or(JsValue::NULL);
	if opener.is_null() || opener.is_undefined() {
		return Ok(parent);
	}
	// cross-origin openers fail instanceof checks; only postMessage is used on them
	Ok(opener.unchecked_into::<Window>())
}

/// Origin, query string and referrer of the page in `window`.
pub fn page_location(window: &Window) -> Result<PageLocation> {
	let location = window.location();
	let origin = location.origin().map_err(|err| Error::InvalidQuery(JsError::describe(&err)))?;
	let query = location.search().map_err(|err| Error::InvalidQuery(JsError::describe(&err)))?;
	let referrer = window.document().map(|document| document.referrer()).unwrap_or_default();
	Ok(PageLocation::new(origin, query).with_referrer(referrer))
}

pub fn to_js(value: &Value) -> Result<JsValue> {
	value.serialize(&Serializer::json_compatible()).map_err(|err| Error::Encode(err.to_string()))
}

pub fn from_js(value: JsValue) -> Result<Value> {
	serde_wasm_bindgen::from_value(value).map_err(|err| Error::Encode(err.to_string()))
}
