// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use framelink_type::RpcError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::model::{Entitlement, Pan, Participant, User, VoiceState};

wire_names! {
	/// Event names the host dispatches.
	pub enum Event {
		Ready => "READY",
		Error => "ERROR",
		VoiceStateUpdate => "VOICE_STATE_UPDATE",
		SpeakingStart => "SPEAKING_START",
		SpeakingStop => "SPEAKING_STOP",
		ActivityLayoutModeUpdate => "ACTIVITY_LAYOUT_MODE_UPDATE",
		OrientationUpdate => "ORIENTATION_UPDATE",
		CurrentUserUpdate => "CURRENT_USER_UPDATE",
		EntitlementCreate => "ENTITLEMENT_CREATE",
		ThermalStateUpdate => "THERMAL_STATE_UPDATE",
		ActivityInstanceParticipantsUpdate => "ACTIVITY_INSTANCE_PARTICIPANTS_UPDATE",
	}
}

impl Event {
	/// Checks `data` against the declared payload shape of this event.
	pub fn validate(&self, data: &Value) -> Result<(), serde_json::Error> {
		match self {
			Event::Ready => check::<ReadyEvent>(data),
			Event::Error => check::<RpcError>(data),
			Event::VoiceStateUpdate => check::<VoiceStateUpdateEvent>(data),
			Event::SpeakingStart | Event::SpeakingStop => check::<SpeakingEvent>(data),
			Event::ActivityLayoutModeUpdate => check::<ActivityLayoutModeUpdateEvent>(data),
			Event::OrientationUpdate => check::<OrientationUpdateEvent>(data),
			Event::CurrentUserUpdate => check::<User>(data),
			Event::EntitlementCreate => check::<EntitlementCreateEvent>(data),
			Event::ThermalStateUpdate => check::<ThermalStateUpdateEvent>(data),
			Event::ActivityInstanceParticipantsUpdate => check::<ParticipantsUpdateEvent>(data),
		}
	}
}

fn check<T: DeserializeOwned>(data: &Value) -> Result<(), serde_json::Error> {
	T::deserialize(data).map(|_| ())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadyEvent {
	pub v: u32,
	pub config: ReadyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadyConfig {
	#[serde(default)]
	pub cdn_host: Option<String>,
	pub api_endpoint: String,
	pub environment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceStateUpdateEvent {
	pub voice_state: VoiceState,
	pub user: User,
	#[serde(default)]
	pub nick: Option<String>,
	pub volume: f64,
	pub mute: bool,
	#[serde(default)]
	pub pan: Option<Pan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakingEvent {
	pub user_id: String,
	#[serde(default)]
	pub channel_id: Option<String>,
	#[serde(default)]
	pub lobby_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLayoutModeUpdateEvent {
	pub layout_mode: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationUpdateEvent {
	pub screen_orientation: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitlementCreateEvent {
	pub entitlement: Entitlement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalStateUpdateEvent {
	pub state: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantsUpdateEvent {
	pub participants: Vec<Participant>,
}
