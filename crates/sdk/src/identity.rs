// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use framelink_type::{Error, Platform, Result};

use crate::config::HANDSHAKE_SDK_VERSION_MINIMUM_MOBILE_VERSION;

/// Where the app page was loaded from, as the session needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
	/// Origin of the app page itself.
	pub origin: String,
	/// Raw query string, with or without the leading `?`.
	pub query: String,
	/// Referrer of the app page; empty when unknown.
	pub referrer: String,
}

impl PageLocation {
	pub fn new(origin: impl Into<String>, query: impl Into<String>) -> Self {
		Self {
			origin: origin.into(),
			query: query.into(),
			referrer: String::new(),
		}
	}

	pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
		self.referrer = referrer.into();
		self
	}

	/// Origin passed to every post: the referrer when known, otherwise `*`.
	pub fn target_origin(&self) -> String {
		if self.referrer.is_empty() {
			"*".to_string()
		} else {
			self.referrer.clone()
		}
	}
}

/// Identity the host passes to the app through the page's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
	pub frame_id: String,
	pub instance_id: String,
	pub platform: Platform,
	pub custom_id: Option<String>,
	pub referrer_id: Option<String>,
	pub guild_id: Option<String>,
	pub channel_id: Option<String>,
	pub location_id: Option<String>,
	pub mobile_app_version: Option<String>,
}

/// Decoded query pairs. Lookups take the first occurrence of a repeated key.
struct QueryParams(Vec<(String, String)>);

impl QueryParams {
	fn parse(query: &str) -> Result<Self> {
		serde_urlencoded::from_str(query.trim_start_matches('?'))
			.map(QueryParams)
			.map_err(|err| Error::InvalidQuery(err.to_string()))
	}

	fn get(&self, name: &str) -> Option<String> {
		self.0.iter().find(|(key, _)| key == name).map(|(_, value)| value.clone())
	}
}

impl SessionIdentity {
	/// Parse the identity out of a page query string.
	///
	/// `frame_id`, `instance_id` and `platform` are required; an empty value
	/// counts as missing. Unknown parameters are ignored and a repeated
	/// parameter takes its first value.
	pub fn from_query(query: &str) -> Result<Self> {
		let params = QueryParams::parse(query)?;

		let frame_id = required(params.get("frame_id"), "frame_id")?;
		let instance_id = required(params.get("instance_id"), "instance_id")?;
		let platform = required(params.get("platform"), "platform")?.parse::<Platform>()?;

		Ok(Self {
			frame_id,
			instance_id,
			platform,
			custom_id: optional(params.get("custom_id")),
			referrer_id: optional(params.get("referrer_id")),
			guild_id: optional(params.get("guild_id")),
			channel_id: optional(params.get("channel_id")),
			location_id: optional(params.get("location_id")),
			mobile_app_version: optional(params.get("mobile_app_version")),
		})
	}

	/// Major component of `mobile_app_version`, or -1 when absent or not numeric.
	pub fn mobile_major_version(&self) -> i64 {
		self.mobile_app_version
			.as_deref()
			.and_then(|version| version.split('.').next())
			.and_then(|major| major.parse::<i64>().ok())
			.unwrap_or(-1)
	}

	/// Whether the handshake may carry `sdk_version`.
	pub fn sends_sdk_version(&self) -> bool {
		match self.platform {
			Platform::Desktop => true,
			Platform::Mobile => self.mobile_major_version() >= HANDSHAKE_SDK_VERSION_MINIMUM_MOBILE_VERSION,
		}
	}
}

fn required(value: Option<String>, name: &'static str) -> Result<String> {
	optional(value).ok_or(Error::MissingQueryParam(name))
}

fn optional(value: Option<String>) -> Option<String> {
	value.filter(|value| !value.is_empty())
}
