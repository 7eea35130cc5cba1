// wallet-core/src/crypto/key_deriver/ed25519.rs
//
// Ed25519 Key Derivation — SLIP-0010 Standard
//
// Dùng cho: Solana
// Algorithm: HMAC-SHA512 (khác BIP-32, chỉ hỗ trợ hardened derivation)
// Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md
//
// QUAN TRỌNG: SLIP-0010 cho ed25519 CHỈ hỗ trợ hardened child derivation.
// Tất cả levels trong path PHẢI là hardened (có dấu ').
// VD: m/44'/501'/0'/0' (OK)    m/44'/501'/0'/0 (INVALID)

use crate::crypto::key_deriver::{key_fingerprint, CurveType, ExtendedKey};
use crate::crypto::paths::DerivationPath;
use crate::crypto::seed::Seed;
use crate::error::{CryptoError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

/// Ed25519 Key Deriver — SLIP-0010 Standard
///
/// # Khác biệt với secp256k1 (BIP-32)
/// - Master key seed: "ed25519 seed" (thay vì "Bitcoin seed")
/// - Child key = IL trực tiếp, không cộng modulo curve order
/// - Không cần validate key range (ed25519 key là bất kỳ 32 bytes)
///
/// # Security
/// - HMAC-SHA512 cho mỗi level derivation
/// - Private key + chain code tự động zeroize
/// - Không lưu intermediate state
pub struct Ed25519Deriver;

impl Ed25519Deriver {
    /// SLIP-0010 master key seed constant
    const MASTER_SECRET: &'static [u8] = b"ed25519 seed";

    /// Derive extended key từ seed + path
    ///
    /// # Arguments
    /// * `seed` - 64 bytes BIP-39 seed
    /// * `path` - Derivation path, all levels MUST be hardened
    ///            e.g. `m/44'/501'/0'/0'`
    pub fn derive(seed: &Seed, path: &DerivationPath) -> WalletResult<ExtendedKey> {
        // Ed25519 SLIP-0010: tất cả segments phải hardened
        if let Some(segment) = path.first_non_hardened() {
            return Err(WalletError::Crypto(CryptoError::NonHardenedSegment(
                segment.to_string(),
            )));
        }

        // Step 1: Master key generation
        // I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
        let (mut key, mut chain_code) = Self::master_key_generate(seed)?;

        // Step 2: Child key derivation (mỗi level)
        // I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || ser32(index))
        let mut depth = 0u8;
        let mut child_index = 0u32;
        let mut parent_fingerprint = [0u8; 4];

        for segment in path.segments() {
            parent_fingerprint = Self::fingerprint(&key);
            let (child_key, child_chain) =
                Self::child_key_derive(&key, &chain_code, segment.raw_index())?;
            // Zeroize old values trước khi overwrite
            key.zeroize();
            chain_code.zeroize();
            key = child_key;
            chain_code = child_chain;
            depth += 1;
            child_index = segment.raw_index();
        }

        Ok(ExtendedKey {
            key_material: Zeroizing::new(key),
            chain_code: Zeroizing::new(chain_code),
            depth,
            child_index,
            parent_fingerprint,
            curve: CurveType::Ed25519,
        })
    }

    /// Derive master key từ seed
    ///
    /// IL (32 bytes) = private key
    /// IR (32 bytes) = chain code
    fn master_key_generate(seed: &Seed) -> WalletResult<([u8; 32], [u8; 32])> {
        let mut mac = HmacSha512::new_from_slice(Self::MASTER_SECRET).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "HMAC init failed: {}",
                e
            )))
        })?;

        mac.update(seed.as_bytes());
        let result = mac.finalize().into_bytes();

        // Copy into stack buffer we fully control, then zeroize
        let mut buf = [0u8; 64];
        buf.copy_from_slice(&result);

        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&buf[..32]);
        chain_code.copy_from_slice(&buf[32..]);
        buf.zeroize();

        Ok((key, chain_code))
    }

    /// Derive child key (hardened only)
    ///
    /// Data = 0x00 || parent_key || ser32(index, hardened bit đã set)
    /// I = HMAC-SHA512(Key = parent_chain_code, Data)
    fn child_key_derive(
        parent_key: &[u8; 32],
        parent_chain_code: &[u8; 32],
        raw_index: u32,
    ) -> WalletResult<([u8; 32], [u8; 32])> {
        let mut mac = HmacSha512::new_from_slice(parent_chain_code).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "HMAC init failed: {}",
                e
            )))
        })?;

        mac.update(&[0x00]);
        mac.update(parent_key);
        mac.update(&raw_index.to_be_bytes());

        let result = mac.finalize().into_bytes();

        let mut buf = [0u8; 64];
        buf.copy_from_slice(&result);

        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&buf[..32]);
        chain_code.copy_from_slice(&buf[32..]);
        buf.zeroize();

        Ok((key, chain_code))
    }

    /// Fingerprint của key: SHA-256(ed25519 public key)[..4]
    fn fingerprint(key: &[u8; 32]) -> [u8; 4] {
        let verifying_key = ed25519_dalek::SigningKey::from_bytes(key).verifying_key();
        key_fingerprint(verifying_key.as_bytes())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::ChainPaths;
    use std::str::FromStr;

    const TEST_SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    #[test]
    fn test_derive_solana_reference_key() {
        // Path của app: m/44'/501'/0'/0' trên seed chuẩn "abandon...about"
        let seed = Seed::from_hex(TEST_SEED).unwrap();
        let key = Ed25519Deriver::derive(&seed, &ChainPaths::solana_wallet(0).unwrap()).unwrap();

        assert_eq!(
            hex::encode(&*key.key_material),
            "37df573b3ac4ad5b522e064e25b63ea16bcbe79d449e81a0268d1047948bb445"
        );
        assert_eq!(key.depth, 4);
        assert_eq!(key.child_index, 0x8000_0000);
    }

    #[test]
    fn test_consistency() {
        let seed = Seed::from_hex(TEST_SEED).unwrap();
        let path = ChainPaths::solana_wallet(0).unwrap();
        let k1 = Ed25519Deriver::derive(&seed, &path).unwrap();
        let k2 = Ed25519Deriver::derive(&seed, &path).unwrap();
        assert_eq!(&*k1.key_material, &*k2.key_material);
        assert_eq!(&*k1.chain_code, &*k2.chain_code);
    }

    #[test]
    fn test_different_accounts() {
        let seed = Seed::from_hex(TEST_SEED).unwrap();
        let k0 = Ed25519Deriver::derive(&seed, &ChainPaths::solana_wallet(0).unwrap()).unwrap();
        let k1 = Ed25519Deriver::derive(&seed, &ChainPaths::solana_wallet(1).unwrap()).unwrap();
        let k2 = Ed25519Deriver::derive(&seed, &ChainPaths::solana_wallet(2).unwrap()).unwrap();
        assert_ne!(&*k0.key_material, &*k1.key_material);
        assert_ne!(&*k1.key_material, &*k2.key_material);
    }

    #[test]
    fn test_non_hardened_path_rejected() {
        let seed = Seed::from_hex(TEST_SEED).unwrap();
        // m/44'/501'/0'/0 — last segment NOT hardened = INVALID for ed25519
        let path = DerivationPath::from_str("m/44'/501'/0'/0").unwrap();
        let result = Ed25519Deriver::derive(&seed, &path);
        assert!(matches!(
            result,
            Err(WalletError::Crypto(CryptoError::NonHardenedSegment(_)))
        ));
    }

    // =========================================================================
    // SLIP-0010 Test Vector 1 (from official spec)
    // Seed: 000102030405060708090a0b0c0d0e0f
    // =========================================================================

    #[test]
    fn test_slip0010_vector_master() {
        let seed_bytes = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let mut mac = HmacSha512::new_from_slice(b"ed25519 seed").unwrap();
        mac.update(&seed_bytes);
        let result = mac.finalize().into_bytes();

        assert_eq!(
            hex::encode(&result[..32]),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(&result[32..]),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
    }

    #[test]
    fn test_slip0010_vector_child_m0h() {
        let parent_key: [u8; 32] =
            hex::decode("2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7")
                .unwrap()
                .try_into()
                .unwrap();
        let parent_cc: [u8; 32] =
            hex::decode("90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb")
                .unwrap()
                .try_into()
                .unwrap();

        let (child_key, child_cc) =
            Ed25519Deriver::child_key_derive(&parent_key, &parent_cc, 0x8000_0000).unwrap();

        assert_eq!(
            hex::encode(child_key),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(child_cc),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
    }
}
