// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashMap,
	fmt::{self, Display, Formatter},
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
};

use parking_lot::RwLock;
use serde_json::Value;

/// Local channel for host errors that are not tied to a command.
pub const ERROR_CHANNEL: &str = "error";

pub type Listener = Arc<dyn Fn(&Value) + Send + Sync>;

/// Handle returned by [`EventBus::on`], used to remove that one listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl Display for ListenerId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "listener#{}", self.0)
	}
}

struct Entry {
	id: ListenerId,
	once: bool,
	listener: Listener,
}

/// Named-event publish/subscribe registry.
///
/// `emit` copies the listener list under the lock and invokes the copy after
/// releasing it, so listeners may register or remove listeners (or emit)
/// while being called. A listener added during an emission is not invoked by
/// that emission.
#[derive(Clone, Default)]
pub struct EventBus {
	listeners: Arc<RwLock<HashMap<String, Vec<Entry>>>>,
	next_id: Arc<AtomicU64>,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a listener for `event`.
	pub fn on<F>(&self, event: &str, listener: F) -> ListenerId
	where
		F: Fn(&Value) + Send + Sync + 'static,
	{
		self.insert(event, Arc::new(listener), false)
	}

	/// Register a listener removed right before its first invocation.
	pub fn once<F>(&self, event: &str, listener: F) -> ListenerId
	where
		F: Fn(&Value) + Send + Sync + 'static,
	{
		self.insert(event, Arc::new(listener), true)
	}

	pub fn insert(&self, event: &str, listener: Listener, once: bool) -> ListenerId {
		let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.listeners.write().entry(event.to_string()).or_default().push(Entry {
			id,
			once,
			listener,
		});
		id
	}

	/// Remove one listener. Returns false if it was not registered for `event`.
	pub fn off(&self, event: &str, id: ListenerId) -> bool {
		let mut listeners = self.listeners.write();
		let Some(entries) = listeners.get_mut(event) else {
			return false;
		};
		let before = entries.len();
		entries.retain(|entry| entry.id != id);
		let removed = entries.len() != before;
		if entries.is_empty() {
			listeners.remove(event);
		}
		removed
	}

	/// Invoke every listener of `event` in registration order. Returns how many ran.
	pub fn emit(&self, event: &str, data: &Value) -> usize {
		let snapshot: Vec<Listener> = {
			let mut listeners = self.listeners.write();
			let Some(entries) = listeners.get_mut(event) else {
				return 0;
			};
			let snapshot = entries.iter().map(|entry| entry.listener.clone()).collect();
			entries.retain(|entry| !entry.once);
			if entries.is_empty() {
				listeners.remove(event);
			}
			snapshot
		};

		for listener in &snapshot {
			listener(data);
		}
		snapshot.len()
	}

	pub fn listener_count(&self, event: &str) -> usize {
		self.listeners.read().get(event).map_or(0, Vec::len)
	}

	pub fn contains(&self, event: &str, id: ListenerId) -> bool {
		self.listeners.read().get(event).is_some_and(|entries| entries.iter().any(|entry| entry.id == id))
	}

	/// Names of events with at least one listener.
	pub fn events(&self) -> Vec<String> {
		self.listeners.read().keys().cloned().collect()
	}

	pub fn clear(&self) {
		self.listeners.write().clear();
	}
}
