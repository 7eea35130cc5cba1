// wallet-core/src/chains/evm/address.rs
//
// EVM Address Module - Explicit Address Derivation
// EIP-55 (Checksum), Keccak-256, secp256k1
//
// Checksum casing được tính trực tiếp (Keccak-256 của lowercase hex,
// nibble >= 8 -> uppercase) thay vì qua address library.

use crate::chains::MaterializedKey;
use crate::crypto::key_deriver::{CurveType, ExtendedKey};
use crate::error::{CryptoError, WalletError, WalletResult};
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use tiny_keccak::{Hasher, Keccak};
use zeroize::{Zeroize, Zeroizing};

/// EVM Address Generator
///
/// # Flow:  Private Key (32B) → Public Key (64B) → Keccak256 → Address (20B) → EIP-55
///
/// # Security
/// - Zeroize: Mọi intermediate data (hash, public key bytes) đều bị xóa sau khi dùng
/// - No Storage: Module này KHÔNG lưu private key
pub struct EvmAddress;

impl EvmAddress {
    // =========================================================================
    // MATERIALIZE — ExtendedKey -> address + secret encoding
    // =========================================================================

    /// Materialize derived key: EIP-55 address + 0x-hex private key
    ///
    /// Key material phải đến từ secp256k1 derivation chain.
    pub fn materialize(key: &ExtendedKey) -> WalletResult<MaterializedKey> {
        if key.curve != CurveType::Secp256k1 {
            return Err(WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "EVM adapter requires a secp256k1 key".to_string(),
            )));
        }

        let address_bytes = Self::derive_bytes_from_slice(&*key.key_material)?;
        let public_identifier = Self::checksum_encode(&address_bytes);
        let secret_encoding =
            Zeroizing::new(format!("0x{}", hex::encode(&*key.key_material)));

        Ok(MaterializedKey {
            public_identifier,
            secret_encoding,
        })
    }

    // =========================================================================
    // CORE: Private Key -> Address Bytes (20 bytes)
    // =========================================================================

    /// Derive 20 bytes address from a **borrowed byte slice**.
    ///
    /// # Algorithm (chuẩn Ethereum Yellow Paper)
    /// 1. `priv_key` (32B) → secp256k1 → `pub_key` (uncompressed, 65B)
    /// 2. Bỏ prefix byte 0x04 → `pub_key_raw` (64B)
    /// 3. Keccak-256(`pub_key_raw`) → `hash` (32B)
    /// 4. `hash[12..32]` → `address` (20B)
    ///
    /// # ⚠ Security Note
    /// The caller is responsible for zeroing `priv_key` after this call.
    pub fn derive_bytes_from_slice(priv_key: &[u8]) -> WalletResult<[u8; 20]> {
        // Parse & validate private key
        let secret_key = SecretKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;

        // Derive public key (uncompressed), wrap trong Zeroizing
        let public_key = secret_key.public_key();
        let encoded = Zeroizing::new(public_key.to_encoded_point(false));
        let pub_key_raw = &encoded.as_bytes()[1..]; // Bỏ 0x04 prefix

        // Keccak-256 hash (stack allocated)
        let mut hasher = Keccak::v256();
        let mut hash = [0u8; 32];
        hasher.update(pub_key_raw);
        hasher.finalize(&mut hash);

        // Extract 20 bytes cuối
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);

        // Zeroize hash (chứa thông tin liên quan tới public key)
        hash.zeroize();

        Ok(address)
    }

    /// Derive EIP-55 checksummed address from a **borrowed byte slice**.
    #[inline]
    pub fn derive_from_slice(priv_key: &[u8]) -> WalletResult<String> {
        let bytes = Self::derive_bytes_from_slice(priv_key)?;
        Ok(Self::checksum_encode(&bytes))
    }

    // =========================================================================
    // EIP-55 CHECKSUM
    // =========================================================================

    /// Encode 20 bytes thành EIP-55 mixed-case address
    ///
    /// Casing rule: Keccak-256(lowercase hex chars); hex char thứ i viết hoa
    /// nếu nibble thứ i của hash >= 8.
    pub fn checksum_encode(address: &[u8; 20]) -> String {
        let lower = hex::encode(address);

        let mut hasher = Keccak::v256();
        let mut hash = [0u8; 32];
        hasher.update(lower.as_bytes());
        hasher.finalize(&mut hash);

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, ch) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if ch.is_ascii_alphabetic() && nibble >= 8 {
                out.push(ch.to_ascii_uppercase());
            } else {
                out.push(ch);
            }
        }
        out
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Validate chuỗi có phải Ethereum address hợp lệ không
    ///
    /// Kiểm tra: `0x` prefix + 40 hex chars. Nếu mixed-case thì checksum
    /// EIP-55 phải khớp; all-lowercase / all-uppercase được chấp nhận
    /// (không mang checksum).
    pub fn is_valid(address: &str) -> bool {
        let Some(body) = address.strip_prefix("0x") else {
            return false;
        };
        if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }

        let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
        if !(has_upper && has_lower) {
            return true; // Không mixed-case -> không có checksum để verify
        }

        // Mixed-case: phải match EIP-55 chính xác
        match Self::decode_bytes(address) {
            Ok(bytes) => Self::checksum_encode(&bytes) == address,
            Err(_) => false,
        }
    }

    /// Normalize về EIP-55 checksum format
    ///
    /// `"0xabcd..."` → `"0xAbCd..."` (mixed-case theo checksum)
    pub fn to_checksum(address: &str) -> WalletResult<String> {
        let bytes = Self::decode_bytes(address)?;
        Ok(Self::checksum_encode(&bytes))
    }

    /// So sánh 2 address (case-insensitive)
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (Self::decode_bytes(addr1), Self::decode_bytes(addr2)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Decode `0x` + 40 hex chars thành 20 bytes (case-insensitive)
    fn decode_bytes(address: &str) -> WalletResult<[u8; 20]> {
        let body = address.strip_prefix("0x").ok_or_else(|| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "Ethereum address must start with 0x".to_string(),
            ))
        })?;
        let raw = hex::decode(body).map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "Invalid Ethereum address hex".to_string(),
            ))
        })?;
        raw.try_into().map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "Ethereum address must be 20 bytes".to_string(),
            ))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
