// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation — BIP-32, hardened-only
//
// Dùng cho: Ethereum/EVM
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
//
// QUAN TRỌNG: index space bị giới hạn ở hardened half (>= 2^31).
// Non-hardened (CKDpub-style) derivation không có call site nào trong
// crate này nên không được implement — segment không hardened bị reject.

use crate::crypto::key_deriver::{key_fingerprint, CurveType, ExtendedKey};
use crate::crypto::paths::DerivationPath;
use crate::crypto::seed::Seed;
use crate::error::{CryptoError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use k256::elliptic_curve::ff::{Field, PrimeField};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{FieldBytes, Scalar, SecretKey};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

/// secp256k1 Key Deriver — explicit BIP-32 (hardened child steps)
///
/// # Khác biệt với ed25519 (SLIP-0010)
/// - Master key seed: "Bitcoin seed" (thay vì "ed25519 seed")
/// - Child key = (IL + parent_key) mod n, không phải IL trực tiếp
/// - IL >= n hoặc child = 0 là invalid (xác suất ~2^-128, trả error)
///
/// # Security
/// - Private keys + chain codes wrap trong `Zeroizing` (auto-zeroize khi drop)
/// - Không lưu intermediate state giữa các lần gọi
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// BIP-32 master key domain-separation constant
    const MASTER_SECRET: &'static [u8] = b"Bitcoin seed";

    /// Derive extended key từ seed + path
    ///
    /// Apply master step 1 lần, rồi fold các segments trái sang phải.
    ///
    /// # Arguments
    /// * `seed` - 64 bytes BIP-39 seed
    /// * `path` - Derivation path, mọi segment PHẢI hardened
    ///            e.g. `m/44'/60'/0'/0'`
    pub fn derive(seed: &Seed, path: &DerivationPath) -> WalletResult<ExtendedKey> {
        if let Some(segment) = path.first_non_hardened() {
            return Err(WalletError::Crypto(CryptoError::NonHardenedSegment(
                segment.to_string(),
            )));
        }

        // Step 1: Master key generation
        // I = HMAC-SHA512(Key = "Bitcoin seed", Data = seed)
        let (mut key, mut chain_code) = Self::master_key_generate(seed)?;

        // Step 2: Hardened child derivation cho mỗi segment
        // I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || ser32(index))
        let mut depth = 0u8;
        let mut child_index = 0u32;
        let mut parent_fingerprint = [0u8; 4];

        for segment in path.segments() {
            parent_fingerprint = Self::fingerprint(&key)?;
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
            curve: CurveType::Secp256k1,
        })
    }

    /// Derive master key từ seed
    ///
    /// IL (32 bytes) = master private key (phải là scalar hợp lệ, khác 0)
    /// IR (32 bytes) = master chain code
    fn master_key_generate(seed: &Seed) -> WalletResult<([u8; 32], [u8; 32])> {
        let mut mac = HmacSha512::new_from_slice(Self::MASTER_SECRET).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "HMAC init failed: {}",
                e
            )))
        })?;

        mac.update(seed.as_bytes());
        let result = mac.finalize().into_bytes();

        let mut buf = [0u8; 64];
        buf.copy_from_slice(&result);

        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&buf[..32]);
        chain_code.copy_from_slice(&buf[32..]);
        buf.zeroize();

        // Master IL phải nằm trong [1, n)
        if Self::parse_scalar(&key).is_none() || key == [0u8; 32] {
            key.zeroize();
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(
                "Master key out of curve order range".to_string(),
            )));
        }

        Ok((key, chain_code))
    }

    /// Derive hardened child key
    ///
    /// Data = 0x00 || parent_key (32 bytes) || ser32(index)
    /// I = HMAC-SHA512(Key = parent_chain_code, Data)
    /// child_key = (IL + parent_key) mod n
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

        let mut il = [0u8; 32];
        let mut chain_code = [0u8; 32];
        il.copy_from_slice(&buf[..32]);
        chain_code.copy_from_slice(&buf[32..]);
        buf.zeroize();

        // child = (IL + parent) mod n; IL >= n hoặc child = 0 là invalid
        let il_scalar = Self::parse_scalar(&il).ok_or_else(|| {
            WalletError::Crypto(CryptoError::DerivationFailed(
                "Derived IL out of curve order range".to_string(),
            ))
        })?;
        il.zeroize();

        let parent_scalar = Self::parse_scalar(parent_key).ok_or_else(|| {
            WalletError::Crypto(CryptoError::DerivationFailed(
                "Parent key out of curve order range".to_string(),
            ))
        })?;

        let child_scalar = il_scalar + parent_scalar;
        if bool::from(child_scalar.is_zero()) {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(
                "Derived child key is zero".to_string(),
            )));
        }

        let key: [u8; 32] = child_scalar.to_repr().into();
        Ok((key, chain_code))
    }

    /// Parse 32 bytes (big-endian) thành scalar mod n; None nếu >= n
    #[inline]
    fn parse_scalar(bytes: &[u8; 32]) -> Option<Scalar> {
        Option::<Scalar>::from(Scalar::from_repr(FieldBytes::clone_from_slice(bytes)))
    }

    /// Fingerprint của key: SHA-256(compressed public key)[..4]
    fn fingerprint(key: &[u8; 32]) -> WalletResult<[u8; 4]> {
        let secret_key = SecretKey::from_slice(key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;
        let encoded = secret_key.public_key().to_encoded_point(true);
        Ok(key_fingerprint(encoded.as_bytes()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
