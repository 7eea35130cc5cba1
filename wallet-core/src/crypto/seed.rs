// wallet-core/src/crypto/seed.rs
//
// Seed Type - 64-byte BIP-39 Seed Wrapper

use crate::error::{CryptoError, WalletError, WalletResult};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// BIP-39 Seed — 64 bytes, immutable sau khi tạo
///
/// # Security
/// - **ZeroizeOnDrop**: buffer được ghi đè bằng 0 khi drop
/// - **No Debug Leak**: Debug impl không hiển thị bytes
///
/// Chỉ được tạo bởi [`WalletMnemonic::to_seed`](crate::crypto::WalletMnemonic::to_seed)
/// (hoặc [`Seed::from_bytes`] trong tests với known vectors).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Tạo seed từ raw bytes (dùng cho test vectors)
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Tạo seed từ hex string (64 bytes = 128 hex chars)
    pub fn from_hex(s: &str) -> WalletResult<Self> {
        let raw = hex::decode(s).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid seed hex: {}",
                e
            )))
        })?;
        let bytes: [u8; 64] = raw.try_into().map_err(|v: Vec<u8>| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid seed length: expected 64 bytes, got {}",
                v.len()
            )))
        })?;
        Ok(Self(bytes))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị seed bytes
impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Seed").field(&"[REDACTED]").finish()
    }
}
