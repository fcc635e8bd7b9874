//! Core address types: the IP version mode and the per-cycle address set.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use thiserror::Error;
use url::form_urlencoded;

/// Query key carrying the IPv4 address.
pub const IPV4_KEY: &str = "ipv4";

/// Query key carrying the IPv6 address.
pub const IPV6_KEY: &str = "ipv6";

/// Which address families to resolve and report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IpVersion {
    /// Report IPv4 only.
    V4,
    /// Report IPv6 only.
    V6,
    /// Report both IPv4 and IPv6.
    #[default]
    Both,
}

impl IpVersion {
    /// Returns true if this version includes IPv4.
    #[must_use]
    pub const fn includes_v4(self) -> bool {
        matches!(self, Self::V4 | Self::Both)
    }

    /// Returns true if this version includes IPv6.
    #[must_use]
    pub const fn includes_v6(self) -> bool {
        matches!(self, Self::V6 | Self::Both)
    }

    /// Returns the numeric form used in the configuration file (`4`, `6`, `46`).
    #[must_use]
    pub const fn as_config_value(self) -> &'static str {
        match self {
            Self::V4 => "4",
            Self::V6 => "6",
            Self::Both => "46",
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
            Self::Both => write!(f, "Both"),
        }
    }
}

/// The addresses resolved during one update cycle.
///
/// # Equality
///
/// Change detection compares address sets structurally, so two sets are
/// equal exactly when both families have the same presence and value.
///
/// # Encoding
///
/// [`encode`](Self::encode) produces the canonical form-urlencoded string
/// `ipv4=<addr>&ipv6=<addr>`, always in that order and omitting absent
/// families. The same string is used as query parameters for the provider
/// and as the on-disk baseline format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AddressSet {
    /// Public IPv4 address, if resolved.
    pub ipv4: Option<Ipv4Addr>,
    /// Global IPv6 address, if resolved.
    pub ipv6: Option<Ipv6Addr>,
}

/// Error returned when an encoded address set cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressSetParseError {
    /// A key other than `ipv4`/`ipv6` was present.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// The same family appeared twice.
    #[error("duplicate field '{0}'")]
    DuplicateField(&'static str),

    /// A value was not a valid address for its family.
    #[error("invalid {field} address '{value}'")]
    InvalidAddress {
        /// The family key
        field: &'static str,
        /// The rejected value
        value: String,
    },
}

impl AddressSet {
    /// Creates an address set from optional addresses.
    #[must_use]
    pub const fn new(ipv4: Option<Ipv4Addr>, ipv6: Option<Ipv6Addr>) -> Self {
        Self { ipv4, ipv6 }
    }

    /// Returns true if neither family was resolved.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ipv4.is_none() && self.ipv6.is_none()
    }

    /// Returns the present families as ordered `(key, value)` pairs.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(v4) = self.ipv4 {
            pairs.push((IPV4_KEY, v4.to_string()));
        }
        if let Some(v6) = self.ipv6 {
            pairs.push((IPV6_KEY, v6.to_string()));
        }
        pairs
    }

    /// Returns the canonical encoding of this set.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.query_pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }

    /// Decodes a canonical encoding back into an address set.
    ///
    /// Accepts the fields in any order. An empty string decodes to the
    /// empty set.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, repeated keys, or values that
    /// are not addresses of the right family.
    pub fn decode(encoded: &str) -> Result<Self, AddressSetParseError> {
        let mut set = Self::default();

        for (key, value) in form_urlencoded::parse(encoded.as_bytes()) {
            match &*key {
                IPV4_KEY => {
                    if set.ipv4.is_some() {
                        return Err(AddressSetParseError::DuplicateField(IPV4_KEY));
                    }
                    set.ipv4 = Some(value.parse().map_err(|_| {
                        AddressSetParseError::InvalidAddress {
                            field: IPV4_KEY,
                            value: value.to_string(),
                        }
                    })?);
                }
                IPV6_KEY => {
                    if set.ipv6.is_some() {
                        return Err(AddressSetParseError::DuplicateField(IPV6_KEY));
                    }
                    set.ipv6 = Some(value.parse().map_err(|_| {
                        AddressSetParseError::InvalidAddress {
                            field: IPV6_KEY,
                            value: value.to_string(),
                        }
                    })?);
                }
                other => return Err(AddressSetParseError::UnknownField(other.to_string())),
            }
        }

        Ok(set)
    }
}

impl fmt::Display for AddressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ipv4, self.ipv6) {
            (Some(v4), Some(v6)) => write!(f, "{v4}, {v6}"),
            (Some(v4), None) => write!(f, "{v4}"),
            (None, Some(v6)) => write!(f, "{v6}"),
            (None, None) => write!(f, "(none)"),
        }
    }
}
