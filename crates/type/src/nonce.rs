// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	borrow::Borrow,
	fmt::{self, Display, Formatter},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation token for one request/reply round trip.
///
/// Generated nonces are random 128-bit values rendered as lowercase hyphenated
/// hex. Nonces received from the host are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nonce(String);

impl Nonce {
	pub fn generate() -> Self {
		Self(Uuid::new_v4().hyphenated().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<String> for Nonce {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for Nonce {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl Borrow<str> for Nonce {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl Display for Nonce {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn test_generate_is_canonical_uuid() {
		let nonce = Nonce::generate();
		let parsed = Uuid::parse_str(nonce.as_str()).unwrap();
		assert_eq!(parsed.get_version_num(), 4);
		assert_eq!(nonce.as_str(), nonce.as_str().to_lowercase());
		assert_eq!(nonce.as_str().len(), 36);
	}

	#[test]
	fn test_generate_distinct() {
		let nonces: HashSet<Nonce> = (0..1000).map(|_| Nonce::generate()).collect();
		assert_eq!(nonces.len(), 1000);
	}

	#[test]
	fn test_serde_transparent() {
		let nonce = Nonce::from("abc");
		assert_eq!(serde_json::to_string(&nonce).unwrap(), r#""abc""#);
	}
}
