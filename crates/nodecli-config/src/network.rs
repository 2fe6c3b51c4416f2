//! Network selection and the default RPC port each network listens on.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Chain networks the paired node can serve.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    EnumIter,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Network {
    /// Production network.
    #[default]
    Main,
    /// Public test network.
    Testnet,
    /// Local regression-test network.
    Regtest,
    /// Simulation network.
    Simnet,
}

impl Network {
    /// HTTP port the node listens on for this network when none is configured.
    #[must_use]
    pub const fn rpc_port(self) -> u16 {
        match self {
            Self::Main => 8080,
            Self::Testnet => 18332,
            Self::Regtest => 48332,
            Self::Simnet => 18556,
        }
    }
}
