// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Declares a fieldless enum whose variants travel as fixed upper-case names.
macro_rules! wire_names {
	(
		$(#[$meta:meta])*
		pub enum $name:ident {
			$($variant:ident => $wire:literal),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub enum $name {
			$($variant),+
		}

		impl $name {
			pub const ALL: &'static [$name] = &[$($name::$variant),+];

			pub fn as_str(&self) -> &'static str {
				match self {
					$($name::$variant => $wire),+
				}
			}

			pub fn from_wire(s: &str) -> Option<Self> {
				match s {
					$($wire => Some($name::$variant),)+
					_ => None,
				}
			}
		}

		impl ::std::fmt::Display for $name {
			fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl ::serde::Serialize for $name {
			fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
				serializer.serialize_str(self.as_str())
			}
		}

		impl<'de> ::serde::Deserialize<'de> for $name {
			fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
				let s = <String as ::serde::Deserialize>::deserialize(deserializer)?;
				$name::from_wire(&s).ok_or_else(|| {
					::serde::de::Error::custom(format!("unknown {} `{}`", stringify!($name), s))
				})
			}
		}
	};
}
