//! Configuration types for Nation3

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Address, Chain, Error};

/// Token contract addresses and page parameters for the veNATION lock
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractConfig {
    /// NATION ERC-20 token
    pub nation_token: Address,

    /// veNATION voting escrow contract (also the approval spender)
    pub venation_token: Address,

    /// veNATION needed to mint a passport NFT
    #[serde(default = "default_passport_required_balance")]
    pub passport_required_balance: f64,

    /// Maximum liquidity rewards boost granted by veNATION
    #[serde(default = "default_rewards_multiplier")]
    pub venation_rewards_multiplier: f64,
}

fn default_passport_required_balance() -> f64 {
    20.0
}

fn default_rewards_multiplier() -> f64 {
    2.5
}

impl ContractConfig {
    /// Known deployments; other chains must be configured explicitly
    pub fn for_chain(chain: Chain) -> Option<Self> {
        match chain {
            Chain::Mainnet => Some(Self::mainnet()),
            Chain::Goerli => None,
        }
    }

    fn mainnet() -> Self {
        Self {
            nation_token: Address::new("0x333A4823466879eeF910A04D473505da62142069"),
            venation_token: Address::new("0xF7deF1D2FBDA6B74beE7452fdf7894Da9201065d"),
            passport_required_balance: default_passport_required_balance(),
            venation_rewards_multiplier: default_rewards_multiplier(),
        }
    }

    /// Check that both contract addresses are well-formed
    pub fn validate(&self) -> Result<(), Error> {
        Address::parse(self.nation_token.as_str())?;
        Address::parse(self.venation_token.as_str())?;
        if !self.passport_required_balance.is_finite() || self.passport_required_balance < 0.0 {
            return Err(Error::Config(format!(
                "passportRequiredBalance must be a non-negative number, got {}",
                self.passport_required_balance
            )));
        }
        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Chain the contracts live on
    pub chain: Chain,

    /// Contract addresses and page parameters
    pub contracts: ContractConfig,

    /// Interface the API binds to
    #[serde(default = "default_api_host")]
    pub api_host: IpAddr,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_api_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_api_port() -> u16 {
    18545
}

impl AppConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.api_host, self.api_port)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("reading {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| Error::Serialization(format!("parsing {}: {}", path.display(), e)))?;
        config.contracts.validate()?;
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chain: Chain::Mainnet,
            contracts: ContractConfig::mainnet(),
            api_host: default_api_host(),
            api_port: default_api_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.chain, Chain::Mainnet);
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:18545");
        assert_eq!(config.contracts.passport_required_balance, 20.0);
        assert!(config.contracts.validate().is_ok());
    }

    #[test]
    fn test_goerli_has_no_default_deployment() {
        assert!(ContractConfig::for_chain(Chain::Goerli).is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"venationToken\""));
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.contracts.nation_token, config.contracts.nation_token);
    }

    #[test]
    fn test_config_defaults_when_fields_missing() {
        let json = r#"{
            "chain": "goerli",
            "contracts": {
                "nationToken": "0x0000000000000000000000000000000000000001",
                "venationToken": "0x0000000000000000000000000000000000000002"
            }
        }"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.chain, Chain::Goerli);
        assert_eq!(parsed.api_port, 18545);
        assert_eq!(parsed.contracts.venation_rewards_multiplier, 2.5);
    }

    #[test]
    fn test_listen_addr_from_json() {
        let json = r#"{
            "chain": "mainnet",
            "contracts": {
                "nationToken": "0x0000000000000000000000000000000000000001",
                "venationToken": "0x0000000000000000000000000000000000000002"
            },
            "apiHost": "0.0.0.0",
            "apiPort": 8080
        }"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.listen_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_validate_rejects_bad_address() {
        let mut contracts = AppConfig::default().contracts;
        contracts.venation_token = Address::new("not-an-address");
        assert!(matches!(contracts.validate(), Err(Error::Protocol(_))));
    }
}
