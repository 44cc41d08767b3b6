// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

wire_names! {
	/// Commands the client may send in a request FRAME.
	pub enum Command {
		Authorize => "AUTHORIZE",
		Authenticate => "AUTHENTICATE",
		GetChannel => "GET_CHANNEL",
		SetActivity => "SET_ACTIVITY",
		GetSkus => "GET_SKUS_EMBEDDED",
		GetEntitlements => "GET_ENTITLEMENTS_EMBEDDED",
		StartPurchase => "START_PURCHASE",
		SetConfig => "SET_CONFIG",
		OpenExternalLink => "OPEN_EXTERNAL_LINK",
		EncourageHardwareAcceleration => "ENCOURAGE_HW_ACCELERATION",
		CaptureLog => "CAPTURE_LOG",
		SetOrientationLockState => "SET_ORIENTATION_LOCK_STATE",
		UserSettingsGetLocale => "USER_SETTINGS_GET_LOCALE",
		GetPlatformBehaviors => "GET_PLATFORM_BEHAVIORS",
		GetInstanceConnectedParticipants => "GET_ACTIVITY_INSTANCE_CONNECTED_PARTICIPANTS",
		OpenInviteDialog => "OPEN_INVITE_DIALOG",
		OpenShareMomentDialog => "OPEN_SHARE_MOMENT_DIALOG",
		ShareLink => "SHARE_LINK",
		Subscribe => "SUBSCRIBE",
		Unsubscribe => "UNSUBSCRIBE",
	}
}

/// `cmd` value of every event frame.
pub const DISPATCH: &str = "DISPATCH";

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wire_names_roundtrip() {
		for command in Command::ALL {
			assert_eq!(Command::from_wire(command.as_str()), Some(*command));
		}
		assert_eq!(Command::from_wire(DISPATCH), None);
	}

	#[test]
	fn test_serde_as_string() {
		assert_eq!(serde_json::to_value(Command::GetSkus).unwrap(), serde_json::json!("GET_SKUS_EMBEDDED"));
		let parsed: Command = serde_json::from_value(serde_json::json!("SET_ACTIVITY")).unwrap();
		assert_eq!(parsed, Command::SetActivity);
		assert!(serde_json::from_value::<Command>(serde_json::json!("NOPE")).is_err());
	}
}
