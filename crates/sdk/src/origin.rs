// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

/// Host origins allowed to message an embedded app in addition to the app's own.
pub const KNOWN_HOST_ORIGINS: &[&str] = &[
	"https://discord.com",
	"https://discordapp.com",
	"https://ptb.discord.com",
	"https://ptb.discordapp.com",
	"https://canary.discord.com",
	"https://canary.discordapp.com",
	"https://staging.discord.co",
	"https://pax.discord.com",
	"http://localhost:3333",
	"null",
];

/// Sender origins whose messages the session accepts. Fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
	origins: BTreeSet<String>,
}

impl AllowList {
	/// The page's own origin plus [`KNOWN_HOST_ORIGINS`].
	pub fn new(own_origin: &str) -> Self {
		let mut origins: BTreeSet<String> = KNOWN_HOST_ORIGINS.iter().map(|origin| origin.to_string()).collect();
		origins.insert(own_origin.to_string());
		Self {
			origins,
		}
	}

	pub fn contains(&self, origin: &str) -> bool {
		self.origins.contains(origin)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.origins.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.origins.len()
	}

	pub fn is_empty(&self) -> bool {
		self.origins.is_empty()
	}
}
