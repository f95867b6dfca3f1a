//! Core type definitions for Nation3

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ProtocolError;

/// EVM account or contract address (20 bytes, `0x`-prefixed hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Parse and validate a `0x`-prefixed 20-byte hex address.
    ///
    /// Checksum casing is accepted but not verified.
    pub fn parse(addr: &str) -> Result<Self, ProtocolError> {
        let invalid = || ProtocolError::InvalidAddress {
            address: addr.to_string(),
        };

        let body = addr
            .strip_prefix("0x")
            .or_else(|| addr.strip_prefix("0X"))
            .ok_or_else(invalid)?;
        if body.len() != 40 {
            return Err(invalid());
        }
        hex::decode(body).map_err(|_| invalid())?;

        Ok(Self(addr.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chain the contracts are deployed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Mainnet,
    Goerli,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Goerli => "goerli",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Goerli => 5,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Chain {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "goerli" => Ok(Self::Goerli),
            other => Err(ProtocolError::NetworkNotSupported {
                network: other.to_string(),
            }),
        }
    }
}

/// Unix timestamp in seconds
pub type UnixSeconds = i64;

/// Token amount in base units (18 decimals)
pub type Wei = u128;

/// Constants
pub mod constants {
    use super::Wei;

    /// Decimals of NATION and veNATION
    pub const TOKEN_DECIMALS: u8 = 18;

    /// 1 token in base units
    pub const WEI_PER_TOKEN: Wei = 1_000_000_000_000_000_000;
}

/// Serialize [`Wei`] amounts as decimal strings.
///
/// JSON numbers lose precision above 2^53, so amounts cross the wire as text.
pub mod wei_string {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Wei;

    pub fn serialize<S: Serializer>(value: &Wei, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Wei, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse::<Wei>()
            .map_err(|e| serde::de::Error::custom(format!("invalid wei amount '{}': {}", raw, e)))
    }
}
