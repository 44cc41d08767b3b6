// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use framelink_sdk::{InboundHandler, Transport};
use framelink_type::{Error, Result};
use parking_lot::Mutex;
use serde_json::Value;

use crate::host::HOST_ORIGIN;

/// One message the session posted.
#[derive(Debug, Clone, PartialEq)]
pub struct Posted {
	pub message: Value,
	pub target_origin: String,
}

impl Posted {
	pub fn opcode(&self) -> Option<i64> {
		self.message.get(0).and_then(Value::as_i64)
	}

	pub fn payload(&self) -> &Value {
		self.message.get(1).unwrap_or(&Value::Null)
	}
}

type Responder = Arc<dyn Fn(&Value) -> Vec<Value> + Send + Sync>;

#[derive(Default)]
struct Inner {
	posted: Mutex<Vec<Posted>>,
	handler: Mutex<Option<InboundHandler>>,
	responder: Mutex<Option<Responder>>,
	fail_posts: AtomicBool,
}

/// In-memory transport that records every post and lets a test play the host.
///
/// Clones share state, so a test keeps one clone while the session owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
	inner: Arc<Inner>,
}

impl MockTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Deliver `data` to the session as if posted by `origin`. Returns false if nobody listens.
	pub fn deliver(&self, origin: &str, data: Value) -> bool {
		let handler = self.inner.handler.lock().clone();
		match handler {
			Some(handler) => {
				handler(origin, data);
				true
			}
			None => false,
		}
	}

	/// Deliver `data` from the host's origin.
	pub fn deliver_from_host(&self, data: Value) -> bool {
		self.deliver(HOST_ORIGIN, data)
	}

	/// Answer every later post synchronously, from inside `post`, with the messages `responder` returns.
	pub fn respond_with<F>(&self, responder: F)
	where
		F: Fn(&Value) -> Vec<Value> + Send + Sync + 'static,
	{
		*self.inner.responder.lock() = Some(Arc::new(responder));
	}

	/// Make every later post fail with a transport error.
	pub fn fail_posts(&self, fail: bool) {
		self.inner.fail_posts.store(fail, Ordering::SeqCst);
	}

	pub fn is_listening(&self) -> bool {
		self.inner.handler.lock().is_some()
	}

	pub fn posted(&self) -> Vec<Posted> {
		self.inner.posted.lock().clone()
	}

	pub fn take_posted(&self) -> Vec<Posted> {
		std::mem::take(&mut *self.inner.posted.lock())
	}

	pub fn messages(&self) -> Vec<Value> {
		self.inner.posted.lock().iter().map(|posted| posted.message.clone()).collect()
	}

	/// Payloads of posted FRAME messages, oldest first.
	pub fn frames(&self) -> Vec<Value> {
		self.inner
			.posted
			.lock()
			.iter()
			.filter(|posted| posted.opcode() == Some(1))
			.map(|posted| posted.payload().clone())
			.collect()
	}

	/// Payloads of posted FRAME messages carrying `cmd`.
	pub fn frames_for(&self, cmd: &str) -> Vec<Value> {
		self.frames().into_iter().filter(|frame| frame["cmd"] == cmd).collect()
	}

	pub fn last_frame(&self) -> Option<Value> {
		self.frames().pop()
	}

	pub fn last_nonce(&self) -> Option<String> {
		self.last_frame().and_then(|frame| frame["nonce"].as_str().map(str::to_string))
	}
}

impl Transport for MockTransport {
	fn listen(&self, handler: InboundHandler) -> Result<()> {
		*self.inner.handler.lock() = Some(handler);
		Ok(())
	}

	fn post(&self, message: Value, target_origin: &str) -> Result<()> {
		if self.inner.fail_posts.load(Ordering::SeqCst) {
			return Err(Error::Transport("mock transport refused the post".to_string()));
		}
		self.inner.posted.lock().push(Posted {
			message: message.clone(),
			target_origin: target_origin.to_string(),
		});

		let responder = self.inner.responder.lock().clone();
		if let Some(responder) = responder {
			for reply in responder(&message) {
				self.deliver_from_host(reply);
			}
		}
		Ok(())
	}

	fn unlisten(&self) {
		self.inner.handler.lock().take();
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_records_posts() {
		let transport = MockTransport::new();
		transport.post(json!([1, {"cmd": "GET_SKUS_EMBEDDED", "nonce": "n1"}]), "*").unwrap();
		transport.post(json!([2, {"code": 1000}]), "*").unwrap();

		assert_eq!(transport.messages().len(), 2);
		assert_eq!(transport.frames(), vec![json!({"cmd": "GET_SKUS_EMBEDDED", "nonce": "n1"})]);
		assert_eq!(transport.last_nonce().as_deref(), Some("n1"));
		assert_eq!(transport.take_posted().len(), 2);
		assert!(transport.posted().is_empty());
	}

	#[test]
	fn test_deliver_requires_listener() {
		let transport = MockTransport::new();
		assert!(!transport.deliver_from_host(json!(1)));

		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink = seen.clone();
		transport
			.listen(Arc::new(move |origin: &str, data: Value| sink.lock().push((origin.to_string(), data))))
			.unwrap();
		assert!(transport.is_listening());
		assert!(transport.deliver("https://x.example", json!(2)));
		assert_eq!(*seen.lock(), vec![("https://x.example".to_string(), json!(2))]);

		transport.unlisten();
		assert!(!transport.is_listening());
	}

	#[test]
	fn test_fail_posts() {
		let transport = MockTransport::new();
		transport.fail_posts(true);
		assert!(matches!(transport.post(json!([]), "*"), Err(Error::Transport(_))));
		assert!(transport.posted().is_empty());
	}
}
