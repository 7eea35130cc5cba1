// wallet-core/src/chains/mod.rs
//
// Chain Adapters - Key Material -> Chain-Native Address + Secret Encoding

pub mod evm;
pub mod solana;

pub use evm::EvmAddress;
pub use solana::SolanaAddress;

use crate::crypto::key_deriver::{CurveType, ExtendedKey};
use crate::crypto::paths::{coin_type, ChainPaths, DerivationPath};
use crate::error::WalletResult;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Các blockchain được hỗ trợ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Solana (ed25519, SLIP-0010)
    Solana,
    /// Ethereum (secp256k1, BIP-32 hardened)
    Ethereum,
}

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Solana, Chain::Ethereum];

    /// SLIP-44 coin type
    #[inline]
    pub const fn coin_type(self) -> u32 {
        match self {
            Chain::Solana => coin_type::SOLANA,
            Chain::Ethereum => coin_type::ETHEREUM,
        }
    }

    /// Curve dùng cho derivation
    #[inline]
    pub const fn curve(self) -> CurveType {
        match self {
            Chain::Solana => CurveType::Ed25519,
            Chain::Ethereum => CurveType::Secp256k1,
        }
    }

    /// Symbol của native token
    #[inline]
    pub const fn symbol(self) -> &'static str {
        match self {
            Chain::Solana => "SOL",
            Chain::Ethereum => "ETH",
        }
    }

    /// Số decimals của native token
    #[inline]
    pub const fn native_decimals(self) -> u8 {
        match self {
            Chain::Solana => 9,
            Chain::Ethereum => 18,
        }
    }

    /// Tên hiển thị
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Chain::Solana => "Solana",
            Chain::Ethereum => "Ethereum",
        }
    }

    /// Canonical wallet path cho index: `m/44'/coin'/{index}'/0'`
    pub fn wallet_path(self, index: u32) -> WalletResult<DerivationPath> {
        ChainPaths::wallet_path(self.coin_type(), index)
    }

    /// Materialize extended key thành address + exportable secret encoding
    ///
    /// - Solana: base58(pubkey) / base58(64-byte keypair)
    /// - Ethereum: EIP-55 address / 0x-hex private key
    pub fn materialize(self, key: &ExtendedKey) -> WalletResult<MaterializedKey> {
        match self {
            Chain::Solana => SolanaAddress::materialize(key),
            Chain::Ethereum => EvmAddress::materialize(key),
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Kết quả materialize: public identifier + secret encoding
pub struct MaterializedKey {
    /// Chain-native address string (base58 hoặc EIP-55 hex)
    pub public_identifier: String,
    /// Exportable secret (auto-zeroize khi drop)
    pub secret_encoding: Zeroizing<String>,
}

// Custom Debug - không hiển thị secret encoding
impl std::fmt::Debug for MaterializedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterializedKey")
            .field("public_identifier", &self.public_identifier)
            .field("secret_encoding", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_metadata() {
        assert_eq!(Chain::Solana.coin_type(), 501);
        assert_eq!(Chain::Ethereum.coin_type(), 60);
        assert_eq!(Chain::Solana.curve(), CurveType::Ed25519);
        assert_eq!(Chain::Ethereum.curve(), CurveType::Secp256k1);
        assert_eq!(Chain::Solana.symbol(), "SOL");
        assert_eq!(Chain::Ethereum.symbol(), "ETH");
    }

    #[test]
    fn test_wallet_path_shape() {
        assert_eq!(
            Chain::Solana.wallet_path(3).unwrap().to_string(),
            "m/44'/501'/3'/0'"
        );
        assert_eq!(
            Chain::Ethereum.wallet_path(0).unwrap().to_string(),
            "m/44'/60'/0'/0'"
        );
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Chain::Solana).unwrap(), "\"solana\"");
        assert_eq!(
            serde_json::from_str::<Chain>("\"ethereum\"").unwrap(),
            Chain::Ethereum
        );
    }
}
