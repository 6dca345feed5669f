//! Deployment networks and their file tags

use crate::error::{FlatDbError, FlatDbResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Known deployments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Main,
    Test,
    Regtest,
    Devnet,
}

impl Network {
    /// Message-start bytes identifying this network on disk
    pub fn magic(&self) -> [u8; 4] {
        match self {
            Self::Main => [0xbf, 0x0c, 0x6b, 0xbd],
            Self::Test => [0xce, 0xe2, 0xca, 0xff],
            Self::Regtest => [0xfc, 0xc1, 0xb7, 0xdc],
            Self::Devnet => [0xe2, 0xca, 0xff, 0xce],
        }
    }

    pub fn tag(&self) -> NetworkTag {
        NetworkTag::from(self.magic())
    }

    /// Find the built-in network using `tag`
    pub fn from_tag(tag: &NetworkTag) -> Option<Self> {
        Self::all().iter().copied().find(|n| n.magic() == tag.as_bytes())
    }

    fn all() -> &'static [Self] {
        &[Self::Main, Self::Test, Self::Regtest, Self::Devnet]
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Main => "main",
            Self::Test => "test",
            Self::Regtest => "regtest",
            Self::Devnet => "devnet",
        };
        write!(f, "{}", name)
    }
}

/// Fixed-size byte sequence identifying the deployment a file belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkTag(Vec<u8>);

impl NetworkTag {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parse a hex string such as `bf0c6bbd`
    pub fn from_hex(value: &str) -> FlatDbResult<Self> {
        let bytes = hex::decode(value.trim()).map_err(|e| FlatDbError::NetworkTagInvalid {
            value: value.to_string(),
            reason: e.to_string(),
        })?;

        if bytes.is_empty() {
            return Err(FlatDbError::NetworkTagInvalid {
                value: value.to_string(),
                reason: "tag must not be empty".to_string(),
            });
        }

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<[u8; 4]> for NetworkTag {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for NetworkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl Serialize for NetworkTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
