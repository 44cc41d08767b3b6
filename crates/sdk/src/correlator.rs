// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	future::Future,
	pin::Pin,
	task::{Context, Poll},
};

use dashmap::DashMap;
use framelink_type::{Error, Nonce, Result};
use serde_json::Value;
use tokio::sync::{oneshot, oneshot::error::TryRecvError};

type Settlement = oneshot::Sender<Result<Value>>;

/// Commands awaiting a reply, keyed by nonce.
///
/// Every entry is settled at most once: `settle` removes it before resolving,
/// so a duplicate reply for the same nonce finds nothing.
#[derive(Default)]
pub struct PendingCommands {
	pending: DashMap<Nonce, Settlement>,
}

impl PendingCommands {
	pub fn new() -> Self {
		Self::default()
	}

	/// A fresh nonce for an outbound request.
	pub fn issue(&self) -> Nonce {
		Nonce::generate()
	}

	/// Registers `nonce` and returns the future its reply settles.
	pub fn register(&self, nonce: Nonce) -> Reply {
		let (tx, rx) = oneshot::channel();
		if self.pending.insert(nonce.clone(), tx).is_some() {
			tracing::error!("Nonce {} registered twice, abandoning the earlier command", nonce);
		}
		Reply {
			nonce,
			rx,
		}
	}

	/// Resolves the command registered under `nonce`. Returns false if none was pending.
	pub fn settle(&self, nonce: &str, outcome: Result<Value>) -> bool {
		match self.pending.remove(nonce) {
			Some((_, tx)) => {
				// the caller may have dropped its Reply
				let _ = tx.send(outcome);
				true
			}
			None => false,
		}
	}

	/// Removes `nonce` without resolving it; its Reply yields [`Error::Closed`].
	pub fn forget(&self, nonce: &str) -> bool {
		self.pending.remove(nonce).is_some()
	}

	/// Rejects every pending command with [`Error::Closed`].
	pub fn close_all(&self) -> usize {
		let nonces: Vec<Nonce> = self.pending.iter().map(|entry| entry.key().clone()).collect();
		let mut closed = 0;
		for nonce in nonces {
			if self.settle(nonce.as_str(), Err(Error::Closed)) {
				closed += 1;
			}
		}
		if closed > 0 {
			tracing::debug!("Rejected {} pending commands", closed);
		}
		closed
	}

	pub fn contains(&self, nonce: &str) -> bool {
		self.pending.contains_key(nonce)
	}

	pub fn len(&self) -> usize {
		self.pending.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}
}

/// Future resolved by the host's reply to one command.
///
/// Resolves to the reply's `data` on success, to [`Error::Rpc`] when the host
/// answered with an ERROR frame, and to [`Error::Closed`] when the entry was
/// dropped without a reply.
#[must_use = "a Reply does nothing unless awaited"]
pub struct Reply {
	nonce: Nonce,
	rx: oneshot::Receiver<Result<Value>>,
}

impl Reply {
	pub fn nonce(&self) -> &Nonce {
		&self.nonce
	}

	/// Takes the outcome if the reply already arrived.
	pub fn try_take(&mut self) -> Option<Result<Value>> {
		match self.rx.try_recv() {
			Ok(outcome) => Some(outcome),
			Err(TryRecvError::Empty) => None,
			Err(TryRecvError::Closed) => Some(Err(Error::Closed)),
		}
	}
}

impl Future for Reply {
	type Output = Result<Value>;

	fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let this = self.get_mut();
		Pin::new(&mut this.rx).poll(cx).map(|received| received.unwrap_or(Err(Error::Closed)))
	}
}
