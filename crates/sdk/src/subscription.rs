// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use framelink_type::{Error, Result};
use framelink_wire_format::Event;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;

use crate::{
	command::CommandRequest,
	event::{Listener, ListenerId},
	session::{Session, SessionInner},
	transport::Transport,
};

type Outcome = watch::Receiver<Option<Result<()>>>;
type Settle = watch::Sender<Option<Result<()>>>;

enum Phase {
	/// SUBSCRIBE is in flight; listeners joining now share its outcome.
	Subscribing(Outcome),
	Subscribed,
	/// UNSUBSCRIBE for the last listener is in flight.
	Unsubscribing(Outcome),
}

impl Phase {
	fn is_settled_by(&self, own: &Outcome) -> bool {
		match self {
			Phase::Subscribing(outcome) | Phase::Unsubscribing(outcome) => outcome.same_channel(own),
			Phase::Subscribed => false,
		}
	}
}

struct Subscription {
	phase: Phase,
	listeners: Vec<ListenerId>,
}

/// Host-side subscription state per event.
///
/// Only listeners added through [`Session::subscribe`] count here; local bus
/// listeners never hold a host subscription.
#[derive(Default)]
pub(crate) struct Subscriptions {
	events: Mutex<HashMap<Event, Subscription>>,
}

impl Subscriptions {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn count(&self, event: Event) -> usize {
		self.events.lock().get(&event).map_or(0, |subscription| subscription.listeners.len())
	}

	pub(crate) fn clear(&self) {
		self.events.lock().clear();
	}
}

enum Acquire {
	Done(ListenerId),
	Send(ListenerId, Settle, Outcome),
	Join(ListenerId, Outcome),
	Wait(Outcome),
}

enum Release {
	Done,
	Send(Settle, Outcome),
	Wait(Outcome),
}

enum Kind {
	Subscribe,
	Unsubscribe(ListenerId),
}

/// An in-flight SUBSCRIBE or UNSUBSCRIBE.
///
/// Dropped unsettled, e.g. when the awaiting future is cancelled, it settles
/// with [`Error::Closed`].
struct Transition<'a, T: Transport> {
	inner: &'a SessionInner<T>,
	event: Event,
	kind: Kind,
	settle: Option<Settle>,
	own: Outcome,
}

impl<'a, T: Transport> Transition<'a, T> {
	fn new(inner: &'a SessionInner<T>, event: Event, kind: Kind, settle: Settle, own: Outcome) -> Self {
		Self {
			inner,
			event,
			kind,
			settle: Some(settle),
			own,
		}
	}

	fn settle(&mut self, result: &Result<()>) {
		let Some(settle) = self.settle.take() else {
			return;
		};

		let abandoned = {
			let mut events = self.inner.subscriptions.events.lock();
			let ours = events.get(&self.event).is_some_and(|subscription| subscription.phase.is_settled_by(&self.own));
			match (&self.kind, result) {
				(Kind::Subscribe, Ok(())) => {
					let empty =
						ours && events.get(&self.event).is_some_and(|subscription| subscription.listeners.is_empty());
					if empty {
						events.remove(&self.event);
					} else if ours && let Some(subscription) = events.get_mut(&self.event) {
						subscription.phase = Phase::Subscribed;
					}
					empty
				}
				(Kind::Subscribe, Err(_)) => {
					if ours && let Some(subscription) = events.remove(&self.event) {
						for id in subscription.listeners {
							self.inner.bus.off(self.event.as_str(), id);
						}
					}
					false
				}
				(Kind::Unsubscribe(id), _) => {
					if ours {
						events.remove(&self.event);
					}
					self.inner.bus.off(self.event.as_str(), *id);
					false
				}
			}
		};

		settle.send_replace(Some(result.clone()));

		// every listener left while SUBSCRIBE was in flight
		if abandoned && let Err(err) = self.inner.send_command(CommandRequest::unsubscribe(self.event, None)) {
			tracing::warn!("Failed to unsubscribe from {}: {}", self.event, err);
		}
	}
}

impl<T: Transport> Drop for Transition<'_, T> {
	fn drop(&mut self) {
		if self.settle.is_some() {
			self.settle(&Err(Error::Closed));
		}
	}
}

impl<T: Transport> SessionInner<T> {
	fn acquire(&self, event: Event, listener: &Listener) -> Acquire {
		let mut events = self.subscriptions.events.lock();
		let Some(subscription) = events.get_mut(&event) else {
			let id = self.bus.insert(event.as_str(), listener.clone(), false);
			let (settle, outcome) = watch::channel(None);
			events.insert(
				event,
				Subscription {
					phase: Phase::Subscribing(outcome.clone()),
					listeners: vec![id],
				},
			);
			return Acquire::Send(id, settle, outcome);
		};

		// the host must be subscribed again once UNSUBSCRIBE settles
		if let Phase::Unsubscribing(outcome) = &subscription.phase {
			return Acquire::Wait(outcome.clone());
		}

		let id = self.bus.insert(event.as_str(), listener.clone(), false);
		subscription.listeners.push(id);
		match &subscription.phase {
			Phase::Subscribing(outcome) => Acquire::Join(id, outcome.clone()),
			_ => Acquire::Done(id),
		}
	}

	fn release(&self, event: Event, id: ListenerId) -> Release {
		let mut events = self.subscriptions.events.lock();
		let Some(subscription) =
			events.get_mut(&event).filter(|subscription| subscription.listeners.contains(&id))
		else {
			self.bus.off(event.as_str(), id);
			return Release::Done;
		};

		match &subscription.phase {
			Phase::Subscribing(outcome) | Phase::Unsubscribing(outcome) => return Release::Wait(outcome.clone()),
			Phase::Subscribed => {}
		}

		if subscription.listeners.len() > 1 {
			subscription.listeners.retain(|listener| *listener != id);
			self.bus.off(event.as_str(), id);
			return Release::Done;
		}

		let (settle, outcome) = watch::channel(None);
		subscription.phase = Phase::Unsubscribing(outcome.clone());
		Release::Send(settle, outcome)
	}

	async fn acknowledged(&self, request: CommandRequest) -> Result<()> {
		self.send_command(request)?.await.map(|_| ())
	}
}

async fn settled(mut outcome: Outcome) -> Result<()> {
	match outcome.wait_for(Option::is_some).await {
		Ok(value) => (*value).clone().unwrap_or(Err(Error::Closed)),
		Err(_) => Err(Error::Closed),
	}
}

impl<T: Transport> Session<T> {
	/// Register `listener` for `event` and make sure the host is sending it.
	///
	/// SUBSCRIBE goes out only for the first subscriber of an event, and never
	/// for READY. Subscribers arriving while it is in flight wait for the same
	/// reply; if the host rejects it every one of them is removed again.
	///
	/// # Arguments
	/// * `event` - event to listen for
	/// * `listener` - called with each dispatched payload
	/// * `args` - subscription arguments such as `{"channel_id": ...}`
	pub async fn subscribe<F>(&self, event: Event, listener: F, args: Option<Value>) -> Result<ListenerId>
	where
		F: Fn(&Value) + Send + Sync + 'static,
	{
		let listener: Listener = Arc::new(listener);
		if event == Event::Ready {
			return Ok(self.inner.bus.insert(event.as_str(), listener, false));
		}

		let mut args = args;
		loop {
			match self.inner.acquire(event, &listener) {
				Acquire::Done(id) => return Ok(id),
				Acquire::Join(id, outcome) => return settled(outcome).await.map(|()| id),
				Acquire::Wait(outcome) => {
					let _ = settled(outcome).await;
				}
				Acquire::Send(id, settle, outcome) => {
					let mut transition = Transition::new(&self.inner, event, Kind::Subscribe, settle, outcome);
					let result = self.inner.acknowledged(CommandRequest::subscribe(event, args.take())).await;
					transition.settle(&result);
					match &result {
						Ok(()) => tracing::debug!("Subscribed to {}", event),
						Err(err) => tracing::warn!("Failed to subscribe to {}: {}", event, err),
					}
					return result.map(|()| id);
				}
			}
		}
	}

	/// Like [`Session::subscribe`], with each payload decoded into `D` first.
	///
	/// Payloads that do not decode are logged and skipped.
	pub async fn subscribe_as<D, F>(&self, event: Event, listener: F, args: Option<Value>) -> Result<ListenerId>
	where
		D: DeserializeOwned,
		F: Fn(D) + Send + Sync + 'static,
	{
		self.subscribe(
			event,
			move |data| match D::deserialize(data) {
				Ok(payload) => listener(payload),
				Err(err) => tracing::warn!("Skipping {} listener, payload did not decode: {}", event, err),
			},
			args,
		)
		.await
	}

	/// Remove the listener `id` of `event`.
	///
	/// When it is the last subscriber, UNSUBSCRIBE is sent and awaited first;
	/// the listener is removed either way and the command's failure is
	/// returned. A `subscribe` arriving meanwhile sends SUBSCRIBE again once
	/// UNSUBSCRIBE settled.
	pub async fn unsubscribe(&self, event: Event, id: ListenerId, args: Option<Value>) -> Result<()> {
		if event == Event::Ready {
			self.inner.bus.off(event.as_str(), id);
			return Ok(());
		}

		let mut args = args;
		loop {
			match self.inner.release(event, id) {
				Release::Done => return Ok(()),
				Release::Wait(outcome) => {
					let _ = settled(outcome).await;
				}
				Release::Send(settle, outcome) => {
					let mut transition =
						Transition::new(&self.inner, event, Kind::Unsubscribe(id), settle, outcome);
					let result = self.inner.acknowledged(CommandRequest::unsubscribe(event, args.take())).await;
					transition.settle(&result);
					match &result {
						Ok(()) => tracing::debug!("Unsubscribed from {}", event),
						Err(err) => tracing::warn!("Failed to unsubscribe from {}: {}", event, err),
					}
					return result;
				}
			}
		}
	}

	/// Remove the listener now and send UNSUBSCRIBE without waiting for the reply.
	pub fn unsubscribe_nowait(&self, event: Event, id: ListenerId, args: Option<Value>) {
		let last = {
			let mut events = self.inner.subscriptions.events.lock();
			self.inner.bus.off(event.as_str(), id);
			let Some(subscription) = events.get_mut(&event) else {
				return;
			};
			subscription.listeners.retain(|listener| *listener != id);
			let last = subscription.listeners.is_empty() && matches!(subscription.phase, Phase::Subscribed);
			if last {
				events.remove(&event);
			}
			last
		};

		if last && let Err(err) = self.inner.send_command(CommandRequest::unsubscribe(event, args)) {
			tracing::warn!("Failed to unsubscribe from {}: {}", event, err);
		}
	}

	/// Number of listeners holding the host subscription of `event`.
	pub fn subscriber_count(&self, event: Event) -> usize {
		self.inner.subscriptions.count(event)
	}
}
