// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod types;

use framelink_type::{Error, Nonce, Result, RpcErrorCode};
use framelink_wire_format::{Command, Event, RequestFrame, model::Entitlement};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
pub use types::*;

use crate::{session::Session, transport::Transport};

/// One outbound command before a nonce is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRequest {
	pub cmd: Command,
	pub args: Option<Value>,
	pub evt: Option<Event>,
}

impl CommandRequest {
	pub fn new(cmd: Command, args: Option<Value>) -> Self {
		Self {
			cmd,
			args,
			evt: None,
		}
	}

	pub fn subscribe(event: Event, args: Option<Value>) -> Self {
		Self {
			cmd: Command::Subscribe,
			args,
			evt: Some(event),
		}
	}

	pub fn unsubscribe(event: Event, args: Option<Value>) -> Self {
		Self {
			cmd: Command::Unsubscribe,
			args,
			evt: Some(event),
		}
	}

	pub fn into_frame(self, nonce: Nonce) -> RequestFrame {
		RequestFrame {
			cmd: self.cmd,
			args: self.args,
			evt: self.evt,
			nonce,
		}
	}
}

/// Typed commands of a [`Session`].
///
/// Every method sends one FRAME and decodes the reply's `data` into the
/// command's response type; a reply that does not match fails with
/// [`Error::Validation`].
pub struct Commands<'a, T: Transport> {
	session: &'a Session<T>,
}

impl<'a, T: Transport> Commands<'a, T> {
	pub(crate) fn new(session: &'a Session<T>) -> Self {
		Self {
			session,
		}
	}

	/// Send `cmd` with raw `args` and decode the reply into `R`.
	pub async fn call<R: DeserializeOwned>(&self, cmd: Command, args: Option<Value>) -> Result<R> {
		let data = self.session.send_command(CommandRequest::new(cmd, args))?.await?;
		decode(cmd, data)
	}

	async fn call_with<A: Serialize, R: DeserializeOwned>(&self, cmd: Command, args: &A) -> Result<R> {
		let args = serde_json::to_value(args)?;
		self.call(cmd, Some(args)).await
	}

	/// Like `call`, but an INVALID_PAYLOAD rejection is retried once with `fallback(args)`.
	async fn call_with_fallback<R, F>(&self, cmd: Command, args: Value, fallback: F) -> Result<R>
	where
		R: DeserializeOwned,
		F: FnOnce(Value) -> Value,
	{
		match self.call(cmd, Some(args.clone())).await {
			Err(Error::Rpc(err)) if err.is(RpcErrorCode::InvalidPayload) => {
				tracing::debug!("{} rejected with {}, retrying with legacy arguments", cmd, err);
				self.call(cmd, Some(fallback(args))).await
			}
			other => other,
		}
	}

	pub async fn authorize(&self, args: &AuthorizeArgs) -> Result<AuthorizeResponse> {
		self.call_with(Command::Authorize, args).await
	}

	pub async fn authenticate(&self, args: &AuthenticateArgs) -> Result<AuthenticateResponse> {
		self.call_with(Command::Authenticate, args).await
	}

	pub async fn get_channel(&self, channel_id: &str) -> Result<Channel> {
		self.call(Command::GetChannel, Some(json!({ "channel_id": channel_id }))).await
	}

	/// Returns the activity as the host stored it.
	pub async fn set_activity(&self, activity: Value) -> Result<Value> {
		self.call_with(
			Command::SetActivity,
			&SetActivityArgs {
				activity,
			},
		)
		.await
	}

	pub async fn get_skus(&self) -> Result<GetSkusResponse> {
		self.call(Command::GetSkus, None).await
	}

	pub async fn get_entitlements(&self) -> Result<GetEntitlementsResponse> {
		self.call(Command::GetEntitlements, None).await
	}

	/// Entitlements granted by the purchase; `None` when the user backed out.
	pub async fn start_purchase(&self, args: &StartPurchaseArgs) -> Result<Option<Vec<Entitlement>>> {
		self.call_with(Command::StartPurchase, args).await
	}

	pub async fn set_config(&self, args: SetConfigArgs) -> Result<SetConfigResponse> {
		self.call_with(Command::SetConfig, &args).await
	}

	pub async fn open_external_link(&self, url: &str) -> Result<OpenExternalLinkResponse> {
		let response: Option<OpenExternalLinkResponse> =
			self.call(Command::OpenExternalLink, Some(json!({ "url": url }))).await?;
		Ok(response.unwrap_or_default())
	}

	pub async fn encourage_hardware_acceleration(&self) -> Result<EncourageHardwareAccelerationResponse> {
		self.call(Command::EncourageHardwareAcceleration, None).await
	}

	pub async fn capture_log(&self, level: CaptureLogLevel, message: impl Into<String>) -> Result<()> {
		let args = CaptureLogArgs {
			level,
			message: message.into(),
		};
		self.call_with::<_, Option<Empty>>(Command::CaptureLog, &args).await.map(|_| ())
	}

	/// Older hosts reject `grid_lock_state`; they get a second request without it.
	pub async fn set_orientation_lock_state(&self, args: SetOrientationLockStateArgs) -> Result<()> {
		let args = serde_json::to_value(args)?;
		self.call_with_fallback::<Option<Empty>, _>(Command::SetOrientationLockState, args, without_grid_lock_state)
			.await
			.map(|_| ())
	}

	pub async fn user_settings_get_locale(&self) -> Result<LocaleResponse> {
		self.call(Command::UserSettingsGetLocale, None).await
	}

	pub async fn get_platform_behaviors(&self) -> Result<PlatformBehaviors> {
		self.call(Command::GetPlatformBehaviors, None).await
	}

	pub async fn get_instance_connected_participants(&self) -> Result<ConnectedParticipantsResponse> {
		self.call(Command::GetInstanceConnectedParticipants, None).await
	}

	pub async fn open_invite_dialog(&self) -> Result<()> {
		self.call::<Option<Empty>>(Command::OpenInviteDialog, None).await.map(|_| ())
	}

	pub async fn open_share_moment_dialog(&self, media_url: &str) -> Result<()> {
		let args = OpenShareMomentDialogArgs {
			media_url: media_url.to_string(),
		};
		self.call_with::<_, Option<Empty>>(Command::OpenShareMomentDialog, &args).await.map(|_| ())
	}

	pub async fn share_link(&self, args: &ShareLinkArgs) -> Result<ShareLinkResponse> {
		self.call_with(Command::ShareLink, args).await
	}
}

fn decode<R: DeserializeOwned>(cmd: Command, data: Value) -> Result<R> {
	serde_json::from_value(data).map_err(|err| Error::Validation {
		command: cmd.to_string(),
		reason: err.to_string(),
	})
}

fn without_grid_lock_state(mut args: Value) -> Value {
	if let Value::Object(fields) = &mut args {
		fields.remove("grid_lock_state");
	}
	args
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_subscribe_request_frame() {
		let frame = CommandRequest::subscribe(Event::VoiceStateUpdate, Some(json!({"channel_id": "c"})))
			.into_frame(Nonce::from("n"));
		assert_eq!(frame.cmd, Command::Subscribe);
		assert_eq!(frame.evt, Some(Event::VoiceStateUpdate));
		assert_eq!(frame.nonce.as_str(), "n");
	}

	#[test]
	fn test_decode_validation_error() {
		let err = decode::<LocaleResponse>(Command::UserSettingsGetLocale, json!({"lang": "en"})).unwrap_err();
		assert!(matches!(err, Error::Validation { command, .. } if command == "USER_SETTINGS_GET_LOCALE"));
	}

	#[test]
	fn test_empty_response_accepts_null_and_object() {
		assert_eq!(decode::<Option<Empty>>(Command::OpenInviteDialog, Value::Null).unwrap(), None);
		assert_eq!(decode::<Option<Empty>>(Command::OpenInviteDialog, json!({})).unwrap(), Some(Empty {}));
	}

	#[test]
	fn test_without_grid_lock_state() {
		let args = serde_json::to_value(SetOrientationLockStateArgs {
			lock_state: 2,
			picture_in_picture_lock_state: Some(1),
			grid_lock_state: Some(3),
		})
		.unwrap();
		assert_eq!(
			without_grid_lock_state(args),
			json!({"lock_state": 2, "picture_in_picture_lock_state": 1})
		);
	}
}
