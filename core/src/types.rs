//! Request and response DTOs for the RGB REST API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Coins assigned to a UTXO, identified as `<txid>:<vout>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Allocation {
    pub coins: u64,
    pub outpoint: String,
}

impl Allocation {
    pub fn new(coins: u64, outpoint: impl Into<String>) -> Self {
        Self {
            coins,
            outpoint: outpoint.into(),
        }
    }
}

/// Initial allocations of an issued asset. The API accepts a single object or
/// a list of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Allocations {
    One(Allocation),
    Many(Vec<Allocation>),
}

impl From<Allocation> for Allocations {
    fn from(allocation: Allocation) -> Self {
        Allocations::One(allocation)
    }
}

impl From<Vec<Allocation>> for Allocations {
    fn from(allocations: Vec<Allocation>) -> Self {
        Allocations::Many(allocations)
    }
}

/// Optional fields of a fungible asset issuance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFungibleOptions {
    pub description: Option<String>,
    pub inflation: Option<Vec<Allocation>>,
    pub renomination: Option<Vec<String>>,
    pub epoch: Option<Vec<String>>,
}

/// Body of `POST :network/fungible/issue`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueFungibleRequest {
    pub ticker: String,
    pub name: String,
    pub precision: u8,
    pub allocations: Allocations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inflation: Option<Vec<Allocation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renomination: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<Vec<String>>,
}

impl IssueFungibleRequest {
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        precision: u8,
        allocations: impl Into<Allocations>,
        options: IssueFungibleOptions,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            precision,
            allocations: allocations.into(),
            description: options.description.filter(|d| !d.is_empty()),
            inflation: options.inflation,
            renomination: options.renomination,
            epoch: options.epoch,
        }
    }
}

/// Result of a fungible asset issuance.
///
/// Fields of `data` other than `assetInfo` are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssuedAsset {
    #[serde(rename = "assetInfo")]
    pub asset_info: serde_json::Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Optional key range of a wallet UTXO scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletUtxosOptions {
    pub key_range_start_idx: Option<u32>,
    pub key_range_count: Option<u32>,
}

/// Unspent output owned by a wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Utxo {
    pub txid: String,
    pub vout: u32,
    pub amount: f64,
    pub height: i64,
}

/// Result of `GET :network/wallet/utxos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletUtxos {
    pub utxos: Vec<Utxo>,
}
