// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Client surface hosting the embedded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
	Desktop,
	Mobile,
}

impl Platform {
	pub fn as_str(&self) -> &'static str {
		match self {
			Platform::Desktop => "desktop",
			Platform::Mobile => "mobile",
		}
	}
}

impl FromStr for Platform {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"desktop" => Ok(Platform::Desktop),
			"mobile" => Ok(Platform::Mobile),
			other => Err(Error::InvalidPlatform(other.to_string())),
		}
	}
}

impl Display for Platform {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_platform() {
		assert_eq!("desktop".parse::<Platform>().unwrap(), Platform::Desktop);
		assert_eq!("mobile".parse::<Platform>().unwrap(), Platform::Mobile);
		assert_eq!("Desktop".parse::<Platform>(), Err(Error::InvalidPlatform("Desktop".to_string())));
	}
}
