// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc, Weak,
	atomic::{AtomicBool, Ordering},
};

use framelink_type::{Error, Result};
use framelink_wire_format::{
	CloseFrame, ENCODING_JSON, Envelope, Event, Handshake, Inbound, IncomingFrame, PROTOCOL_VERSION, WireError,
	command::DISPATCH,
};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::{
	command::{CommandRequest, Commands},
	config::{SDK_VERSION, SdkConfig},
	correlator::{PendingCommands, Reply},
	event::{ERROR_CHANNEL, EventBus, ListenerId},
	identity::{PageLocation, SessionIdentity},
	origin::AllowList,
	subscription::Subscriptions,
	transport::{InboundHandler, Transport},
};

/// Lifecycle of a [`Session`]. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
	Constructing,
	Handshaking,
	Ready,
	Closed,
}

/// One app-side protocol session.
///
/// Cloning is cheap; all clones share the same state.
pub struct Session<T: Transport> {
	pub(crate) inner: Arc<SessionInner<T>>,
}

impl<T: Transport> Clone for Session<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

pub(crate) struct SessionInner<T: Transport> {
	config: SdkConfig,
	identity: SessionIdentity,
	allow_list: AllowList,
	target_origin: String,
	transport: T,
	state: Mutex<SessionState>,
	pub(crate) pending: PendingCommands,
	pub(crate) bus: EventBus,
	pub(crate) subscriptions: Subscriptions,
	pub(crate) capture: AtomicBool,
}

impl<T: Transport> Session<T> {
	/// Parse the page identity, start listening and send the HANDSHAKE.
	///
	/// # Arguments
	/// * `config` - client id and local options
	/// * `location` - origin, query string and referrer of the app page
	/// * `transport` - channel to the host window
	///
	/// Fails without posting anything when a required query parameter is
	/// missing or the platform is unknown.
	pub fn connect(config: SdkConfig, location: PageLocation, transport: T) -> Result<Self> {
		let identity = SessionIdentity::from_query(&location.query)?;

		let inner = Arc::new(SessionInner {
			config,
			identity,
			allow_list: AllowList::new(&location.origin),
			target_origin: location.target_origin(),
			transport,
			state: Mutex::new(SessionState::Constructing),
			pending: PendingCommands::new(),
			bus: EventBus::new(),
			subscriptions: Subscriptions::new(),
			capture: AtomicBool::new(false),
		});

		let weak = Arc::downgrade(&inner);
		let handler: InboundHandler = Arc::new(move |origin: &str, data: Value| {
			if let Some(inner) = weak.upgrade() {
				inner.handle_message(origin, data);
			}
		});
		inner.transport.listen(handler)?;

		if let Err(err) = inner.handshake() {
			inner.transport.unlisten();
			return Err(err);
		}

		Ok(Self {
			inner,
		})
	}

	/// Resolves once the host dispatched READY.
	///
	/// Returns immediately when already ready and fails with [`Error::Closed`]
	/// when the session closes first.
	pub async fn ready(&self) -> Result<()> {
		let rx = {
			let state = self.inner.state.lock();
			match *state {
				SessionState::Ready => return Ok(()),
				SessionState::Closed => return Err(Error::Closed),
				SessionState::Constructing | SessionState::Handshaking => {}
			}
			let (tx, rx) = oneshot::channel();
			let tx = Mutex::new(Some(tx));
			self.inner.bus.once(Event::Ready.as_str(), move |_| {
				if let Some(tx) = tx.lock().take() {
					let _ = tx.send(());
				}
			});
			rx
		};
		rx.await.map_err(|_| Error::Closed)
	}

	/// Send one command and return the future settled by the host's reply.
	pub fn send_command(&self, request: CommandRequest) -> Result<Reply> {
		self.inner.send_command(request)
	}

	/// Typed command surface.
	pub fn commands(&self) -> Commands<'_, T> {
		Commands::new(self)
	}

	/// Register a local listener without telling the host.
	///
	/// Local listeners never count toward the host subscription of an event.
	pub fn on<F>(&self, event: &str, listener: F) -> ListenerId
	where
		F: Fn(&Value) + Send + Sync + 'static,
	{
		self.inner.bus.on(event, listener)
	}

	/// Remove a listener added with [`Session::on`]. Subscribed listeners are
	/// removed with [`Session::unsubscribe`].
	pub fn off(&self, event: &str, id: ListenerId) -> bool {
		self.inner.bus.off(event, id)
	}

	/// Listen for host errors that carry no nonce.
	pub fn on_error<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(framelink_type::RpcError) + Send + Sync + 'static,
	{
		self.inner.bus.on(ERROR_CHANNEL, move |data| match serde_json::from_value(data.clone()) {
			Ok(error) => listener(error),
			Err(err) => tracing::warn!("Dropping malformed host error {}: {}", data, err),
		})
	}

	/// Shut the session down. Idempotent.
	///
	/// Stops listening, posts CLOSE, rejects every pending command with
	/// [`Error::Closed`] and drops all listeners.
	pub fn close(&self, code: impl Into<i64>, message: Option<&str>) {
		self.inner.close(code.into(), message)
	}

	pub fn state(&self) -> SessionState {
		self.inner.state()
	}

	pub fn is_ready(&self) -> bool {
		self.state() == SessionState::Ready
	}

	pub fn identity(&self) -> &SessionIdentity {
		&self.inner.identity
	}

	pub fn config(&self) -> &SdkConfig {
		&self.inner.config
	}

	pub fn allow_list(&self) -> &AllowList {
		&self.inner.allow_list
	}

	pub fn target_origin(&self) -> &str {
		&self.inner.target_origin
	}

	pub fn transport(&self) -> &T {
		&self.inner.transport
	}

	/// Number of commands still awaiting a reply.
	pub fn pending_commands(&self) -> usize {
		self.inner.pending.len()
	}

	pub fn listener_count(&self, event: &str) -> usize {
		self.inner.bus.listener_count(event)
	}

	/// Whether log events are currently forwarded to the host.
	pub fn is_capturing_logs(&self) -> bool {
		self.inner.capture.load(Ordering::Acquire)
	}

	pub(crate) fn downgrade(&self) -> Weak<SessionInner<T>> {
		Arc::downgrade(&self.inner)
	}
}

impl<T: Transport> SessionInner<T> {
	pub(crate) fn state(&self) -> SessionState {
		*self.state.lock()
	}

	fn handshake(&self) -> Result<()> {
		let handshake = Handshake {
			v: PROTOCOL_VERSION,
			encoding: Some(ENCODING_JSON.to_string()),
			client_id: self.config.client_id.clone(),
			frame_id: self.identity.frame_id.clone(),
			sdk_version: self.identity.sends_sdk_version().then(|| SDK_VERSION.to_string()),
		};

		// a host may answer from inside post
		*self.state.lock() = SessionState::Handshaking;
		self.post(&Envelope::Handshake(handshake))?;
		tracing::debug!(
			"Sent handshake for frame {} on {} to {}",
			self.identity.frame_id,
			self.identity.platform,
			self.target_origin
		);
		Ok(())
	}

	fn post(&self, envelope: &Envelope) -> Result<()> {
		let message = envelope.to_value()?;
		self.transport.post(message, &self.target_origin)
	}

	pub(crate) fn send_command(&self, request: CommandRequest) -> Result<Reply> {
		if self.state() == SessionState::Closed {
			return Err(Error::Closed);
		}

		let nonce = self.pending.issue();
		let reply = self.pending.register(nonce.clone());
		let frame = request.into_frame(nonce.clone());
		let cmd = frame.cmd;

		if let Err(err) = self.post(&Envelope::Frame(frame)) {
			self.pending.forget(nonce.as_str());
			tracing::warn!("Failed to send {} ({}): {}", cmd, nonce, err);
			return Err(err);
		}
		tracing::trace!("Sent {} ({})", cmd, nonce);
		Ok(reply)
	}

	fn handle_message(&self, origin: &str, data: Value) {
		if !self.allow_list.contains(origin) {
			tracing::trace!("Dropping message from disallowed origin {}", origin);
			return;
		}
		if self.state() == SessionState::Closed {
			return;
		}

		let inbound = match Inbound::parse(data) {
			Ok(inbound) => inbound,
			Err(WireError::NotAnEnvelope) => {
				tracing::debug!("Ignoring non-envelope message from {}", origin);
				return;
			}
			Err(err) => {
				tracing::warn!("Dropping invalid message from {}: {}", origin, err);
				return;
			}
		};

		match inbound {
			Inbound::Handshake | Inbound::Hello(_) => {}
			Inbound::Close(close) => {
				tracing::debug!("Host sent close {}: {}", close.code, close.message.as_deref().unwrap_or(""));
			}
			Inbound::Frame(frame) => self.handle_frame(frame),
		}
	}

	fn handle_frame(&self, frame: IncomingFrame) {
		match frame {
			IncomingFrame::Dispatch {
				event,
				data,
				..
			} => {
				if event == Event::Ready {
					self.mark_ready();
				}
				self.bus.emit(event.as_str(), &data);
			}
			IncomingFrame::Error {
				cmd,
				error,
				..
			} if cmd == DISPATCH => {
				self.bus.emit(Event::Error.as_str(), &serde_json::to_value(&error).unwrap_or_default());
			}
			IncomingFrame::Error {
				cmd,
				error,
				nonce: Some(nonce),
			} => {
				if !self.pending.settle(nonce.as_str(), Err(Error::Rpc(error))) {
					tracing::warn!("Discarding {} error for unknown nonce {}", cmd, nonce);
				}
			}
			IncomingFrame::Error {
				cmd,
				error,
				nonce: None,
			} => {
				tracing::warn!("Host reported {} for {} without a nonce", error, cmd);
				self.bus.emit(ERROR_CHANNEL, &serde_json::to_value(&error).unwrap_or_default());
			}
			IncomingFrame::Response {
				cmd,
				data,
				nonce: Some(nonce),
			} => {
				if !self.pending.settle(nonce.as_str(), Ok(data)) {
					tracing::warn!("Discarding {} reply for unknown nonce {}", cmd, nonce);
				}
			}
			IncomingFrame::Response {
				cmd,
				nonce: None,
				..
			} => {
				tracing::warn!("Discarding {} reply without a nonce", cmd);
			}
		}
	}

	fn mark_ready(&self) {
		{
			let mut state = self.state.lock();
			if *state != SessionState::Handshaking {
				return;
			}
			*state = SessionState::Ready;
		}
		if !self.config.disable_console_log_override {
			self.capture.store(true, Ordering::Release);
		}
		tracing::debug!("Session for frame {} is ready", self.identity.frame_id);
	}

	fn close(&self, code: i64, message: Option<&str>) {
		{
			let mut state = self.state.lock();
			if *state == SessionState::Closed {
				return;
			}
			*state = SessionState::Closed;
		}
		self.capture.store(false, Ordering::Release);
		self.transport.unlisten();

		let frame = CloseFrame {
			code,
			message: message.map(str::to_string),
			nonce: Some(self.pending.issue()),
		};
		if let Err(err) = self.post(&Envelope::Close(frame)) {
			tracing::warn!("Failed to send close {}: {}", code, err);
		}

		self.pending.close_all();
		self.subscriptions.clear();
		self.bus.clear();
		tracing::debug!("Session for frame {} closed with {}", self.identity.frame_id, code);
	}
}
