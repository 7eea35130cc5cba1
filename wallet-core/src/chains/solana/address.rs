// wallet-core/src/chains/solana/address.rs
//
// Solana Address Module - Ed25519 Keypair + Base58
//
// Key material 32 bytes = ed25519 seed -> expand thành 64-byte signing
// keypair. Public identifier = base58(pubkey). Secret encoding =
// base58(secret || pubkey) — format import của Phantom/solana-keygen.

use crate::chains::MaterializedKey;
use crate::crypto::key_deriver::{CurveType, ExtendedKey};
use crate::error::{CryptoError, WalletError, WalletResult};
use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

/// Solana Address Generator
///
/// # Flow:  Key Material (32B) → SigningKey → Pubkey (32B) → Base58
///
/// # Security
/// - Keypair bytes wrap trong `Zeroizing` trước khi encode
/// - Module này KHÔNG lưu key material
pub struct SolanaAddress;

impl SolanaAddress {
    // =========================================================================
    // MATERIALIZE — ExtendedKey -> address + secret encoding
    // =========================================================================

    /// Materialize derived key: base58 address + base58 keypair secret
    ///
    /// Key material phải đến từ ed25519 derivation chain.
    pub fn materialize(key: &ExtendedKey) -> WalletResult<MaterializedKey> {
        if key.curve != CurveType::Ed25519 {
            return Err(WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "Solana adapter requires an ed25519 key".to_string(),
            )));
        }

        let signing_key = SigningKey::from_bytes(&key.key_material);
        let public_identifier = bs58::encode(signing_key.verifying_key().as_bytes()).into_string();

        // 64 bytes: secret seed (32) || public key (32)
        let keypair_bytes = Zeroizing::new(signing_key.to_keypair_bytes());
        let secret_encoding = Zeroizing::new(bs58::encode(&*keypair_bytes).into_string());

        Ok(MaterializedKey {
            public_identifier,
            secret_encoding,
        })
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Validate chuỗi có phải Solana address hợp lệ không
    ///
    /// Base58 decode phải ra đúng 32 bytes.
    pub fn is_valid(address: &str) -> bool {
        match bs58::decode(address).into_vec() {
            Ok(bytes) => bytes.len() == 32,
            Err(_) => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
