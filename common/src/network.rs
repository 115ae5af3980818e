//! Ion peer network. Eg. *Mainnet*.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::params::Params;

/// An error parsing a network name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The network name is not known.
    #[error("unknown network `{0}`")]
    UnknownNetwork(String),
}

/// Ion peer network.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Network {
    /// Ion Mainnet.
    Mainnet,
    /// Ion Testnet.
    Testnet,
    /// Ion development network.
    Devnet,
    /// Ion regression test net.
    Regtest,
}

impl Default for Network {
    fn default() -> Self {
        Self::Mainnet
    }
}

impl Network {
    /// Return the short string representation of this network.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Regtest => "regtest",
        }
    }

    /// Get the consensus parameters for this network.
    pub fn params(&self) -> Params {
        Params::new(*self)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    /// Parse a network name.
    ///
    /// ```
    /// use ion_common::network::Network;
    ///
    /// assert_eq!("main".parse(), Ok(Network::Mainnet));
    /// assert_eq!("regtest".parse(), Ok(Network::Regtest));
    /// assert!("signet".parse::<Network>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            "devnet" | "dev" => Ok(Self::Devnet),
            "regtest" => Ok(Self::Regtest),
            _ => Err(Error::UnknownNetwork(s.to_owned())),
        }
    }
}
