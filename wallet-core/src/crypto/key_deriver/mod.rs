// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - Multi-Curve Support
//
// Kiến trúc:
// ┌─────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)           │
// │                    │                            │
// │     ┌──────────────┴──────────────┐             │
// │     ▼                             ▼             │
// │  secp256k1 (BIP-32,        ed25519 (SLIP-0010)  │
// │  hardened-only)            │                    │
// │  └─ Ethereum/EVM           └─ Solana            │
// └─────────────────────────────────────────────────┘
//
// Cả hai đường đều là explicit HMAC-SHA512 chains — không có
// black-box derivation library phía sau.

pub mod ed25519;
pub mod secp256k1;

// Re-exports
pub use ed25519::Ed25519Deriver;
pub use secp256k1::Secp256k1Deriver;

use crate::crypto::paths::DerivationPath;
use crate::crypto::seed::Seed;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

// =============================================================================
// COMMON TYPES
// =============================================================================
/// Curve type cho key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveType {
    /// secp256k1 — Ethereum và các EVM chain
    Secp256k1,
    /// Ed25519 — Solana
    Ed25519,
}

/// Extended key — output của một derivation chain
///
/// Chỉ được tạo bởi [`Secp256k1Deriver`] / [`Ed25519Deriver`], và chỉ
/// được consume bởi chain adapters. Không bao giờ serialize ra ngoài.
pub struct ExtendedKey {
    /// Private key material (32 bytes, auto-zeroize khi drop)
    pub key_material: Zeroizing<[u8; 32]>,
    /// Chain code (32 bytes, auto-zeroize khi drop)
    pub chain_code: Zeroizing<[u8; 32]>,
    /// Số bước derivation từ master (master = 0)
    pub depth: u8,
    /// Wire-format index của segment cuối (hardened bit đã set)
    pub child_index: u32,
    /// 4 bytes đầu của SHA-256(parent public key); master = [0; 4]
    pub parent_fingerprint: [u8; 4],
    /// Curve đã derive
    pub curve: CurveType,
}

// Custom Debug - không hiển thị key material / chain code
impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("key_material", &"[REDACTED]")
            .field("chain_code", &"[REDACTED]")
            .field("depth", &self.depth)
            .field("child_index", &self.child_index)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("curve", &self.curve)
            .finish()
    }
}

/// Fingerprint nội bộ: 4 bytes đầu của SHA-256(public key bytes)
pub(crate) fn key_fingerprint(public_key_bytes: &[u8]) -> [u8; 4] {
    let hash = Sha256::digest(public_key_bytes);
    let mut fp = [0u8; 4];
    fp.copy_from_slice(&hash[..4]);
    fp
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================
/// Unified Key Deriver - Entry point cho mọi loại key derivation
///
/// Chọn curve-specific deriver, hoặc gọi trực tiếp
/// `Secp256k1Deriver` / `Ed25519Deriver`.
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derive key theo curve type
    ///
    /// # Arguments
    /// * `seed` - BIP-39 seed (64 bytes)
    /// * `path` - Parsed derivation path (e.g. `m/44'/501'/0'/0'`)
    /// * `curve` - Curve type (secp256k1 hoặc ed25519)
    pub fn derive(
        seed: &Seed,
        path: &DerivationPath,
        curve: CurveType,
    ) -> crate::error::WalletResult<ExtendedKey> {
        match curve {
            CurveType::Secp256k1 => Secp256k1Deriver::derive(seed, path),
            CurveType::Ed25519 => Ed25519Deriver::derive(seed, path),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::ChainPaths;

    const TEST_SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    #[test]
    fn test_unified_dispatch() {
        let seed = Seed::from_hex(TEST_SEED).unwrap();

        let secp = KeyDeriver::derive(
            &seed,
            &ChainPaths::evm_wallet(0).unwrap(),
            CurveType::Secp256k1,
        )
        .unwrap();
        assert_eq!(secp.curve, CurveType::Secp256k1);
        assert_eq!(secp.depth, 4);

        let ed = KeyDeriver::derive(
            &seed,
            &ChainPaths::solana_wallet(0).unwrap(),
            CurveType::Ed25519,
        )
        .unwrap();
        assert_eq!(ed.curve, CurveType::Ed25519);
        assert_eq!(ed.depth, 4);
    }

    #[test]
    fn test_different_curves_produce_different_keys() {
        let seed = Seed::from_hex(TEST_SEED).unwrap();
        let path = ChainPaths::wallet_path(60, 0).unwrap();

        // Cùng path, khác curve — key phải khác nhau vì khác domain key
        let secp = KeyDeriver::derive(&seed, &path, CurveType::Secp256k1).unwrap();
        let ed = KeyDeriver::derive(&seed, &path, CurveType::Ed25519).unwrap();
        assert_ne!(&*secp.key_material, &*ed.key_material);
    }

    #[test]
    fn test_debug_does_not_leak() {
        let seed = Seed::from_hex(TEST_SEED).unwrap();
        let key = KeyDeriver::derive(
            &seed,
            &ChainPaths::solana_wallet(0).unwrap(),
            CurveType::Ed25519,
        )
        .unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains(&hex::encode(&*key.key_material)));
    }
}
