// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Client side of the embedded-app session protocol.
//!
//! A [`Session`] is created once per page. It parses the identity the host put
//! in the page's query string, sends the HANDSHAKE, and from then on routes
//! every inbound message: replies settle the command that carries the same
//! nonce, dispatched events fan out to listeners on the [`EventBus`].
//!
//! ```no_run
//! # async fn run<T: framelink_sdk::Transport>(transport: T) -> framelink_type::Result<()> {
//! use framelink_sdk::{PageLocation, SdkConfig, Session};
//! use framelink_wire_format::Event;
//!
//! let location = PageLocation::new("https://app.example", "?frame_id=f1&instance_id=i1&platform=desktop");
//! let session = Session::connect(SdkConfig::new("1234"), location, transport)?;
//! session.ready().await?;
//!
//! let skus = session.commands().get_skus().await?;
//! session.subscribe(Event::SpeakingStart, |data| println!("{data}"), None).await?;
//! # let _ = skus;
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod command;
pub mod config;
pub mod correlator;
pub mod event;
pub mod identity;
pub mod origin;
pub mod session;
mod subscription;
pub mod transport;

pub use capture::HostLogLayer;
pub use command::{CommandRequest, Commands};
pub use config::{HANDSHAKE_SDK_VERSION_MINIMUM_MOBILE_VERSION, SDK_VERSION, SdkConfig};
pub use correlator::{PendingCommands, Reply};
pub use event::{ERROR_CHANNEL, EventBus, Listener, ListenerId};
pub use identity::{PageLocation, SessionIdentity};
pub use origin::{AllowList, KNOWN_HOST_ORIGINS};
pub use session::{Session, SessionState};
pub use transport::{InboundHandler, Transport};
