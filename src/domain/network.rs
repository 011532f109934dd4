use crate::domain::errors::EvmError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum EvmNetwork {
    Eth = 1,
    OperaMainnet = 250,
    OperaTestnet = 4002,
    Arbitrum = 42161,
    Sepolia = 11155111,
}

impl EvmNetwork {
    pub fn chain_id(self) -> u64 {
        self as u64
    }

    pub fn default_http_rpc(self) -> Option<&'static str> {
        match self {
            EvmNetwork::OperaMainnet => Some("https://rpc.ftm.tools"),
            EvmNetwork::OperaTestnet => Some("https://rpc.testnet.fantom.network/"),
            _ => None,
        }
    }

    pub fn default_ws_rpc(self) -> Option<&'static str> {
        match self {
            EvmNetwork::OperaMainnet => Some("wss://wsapi.fantom.network/"),
            _ => None,
        }
    }
}

impl TryFrom<u64> for EvmNetwork {
    type Error = EvmError;

    fn try_from(id: u64) -> Result<Self, EvmError> {
        match id {
            1 => Ok(EvmNetwork::Eth),
            250 => Ok(EvmNetwork::OperaMainnet),
            4002 => Ok(EvmNetwork::OperaTestnet),
            42161 => Ok(EvmNetwork::Arbitrum),
            11155111 => Ok(EvmNetwork::Sepolia),
            _ => Err(EvmError::UnsupportedNetwork(id)),
        }
    }
}

impl Display for EvmNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chain_id())
    }
}

/// Numeric strings always parse to [`NetworkId::Chain`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NetworkId {
    Chain(u64),
    Name(String),
}

impl NetworkId {
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            NetworkId::Chain(id) => Some(*id),
            NetworkId::Name(_) => None,
        }
    }
}

impl From<u64> for NetworkId {
    fn from(id: u64) -> Self {
        NetworkId::Chain(id)
    }
}

impl From<EvmNetwork> for NetworkId {
    fn from(network: EvmNetwork) -> Self {
        NetworkId::Chain(network.chain_id())
    }
}

impl From<&str> for NetworkId {
    fn from(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(id) => NetworkId::Chain(id),
            Err(_) => NetworkId::Name(s.to_string()),
        }
    }
}

impl From<String> for NetworkId {
    fn from(s: String) -> Self {
        NetworkId::from(s.as_str())
    }
}

impl From<&NetworkId> for NetworkId {
    fn from(id: &NetworkId) -> Self {
        id.clone()
    }
}

impl FromStr for NetworkId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NetworkId::from(s))
    }
}

impl Display for NetworkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkId::Chain(id) => write!(f, "{id}"),
            NetworkId::Name(name) => write!(f, "{name}"),
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(NetworkId::from(s))
    }
}
