// wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module - Typed Multi-Chain HD Wallet Paths
// BIP-44 (Purpose), SLIP-44 (Coin Types), SLIP-0010 (ed25519 hardened-only)

use crate::error::{CryptoError, WalletError, WalletResult};
use std::fmt;
use std::str::FromStr;

/// Hardened flag bit (index space chia đôi tại 2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    /// Ethereum — EVM chains dùng chung coin_type 60
    pub const ETHEREUM: u32 = 60;
    /// Solana (ed25519)
    pub const SOLANA: u32 = 501;
}

// =============================================================================
// PATH SEGMENTS
// =============================================================================

/// Một segment trong derivation path: (index, hardened)
///
/// Index luôn < 2^31; hardened flag được encode riêng thay vì trộn vào
/// high bit như wire format, để type system giữ invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildNumber {
    index: u32,
    hardened: bool,
}

impl ChildNumber {
    /// Tạo segment mới. Index phải < 2^31.
    pub fn new(index: u32, hardened: bool) -> WalletResult<Self> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::Crypto(CryptoError::InvalidPath(format!(
                "Index {} out of range (must be < 2^31)",
                index
            ))));
        }
        Ok(Self { index, hardened })
    }

    /// Segment hardened (dạng `i'`)
    pub fn hardened(index: u32) -> WalletResult<Self> {
        Self::new(index, true)
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// Wire-format index: hardened segment set high bit (ser32 input)
    #[inline]
    pub fn raw_index(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

// =============================================================================
// DERIVATION PATH
// =============================================================================

/// Derivation path đã parse: ordered sequence of [`ChildNumber`]
///
/// Textual form: `m/44'/501'/0'/0'`. Hỗ trợ cả suffix `'` và `h`
/// cho hardened segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    segments: Vec<ChildNumber>,
}

impl DerivationPath {
    pub fn new(segments: Vec<ChildNumber>) -> Self {
        Self { segments }
    }

    #[inline]
    pub fn segments(&self) -> &[ChildNumber] {
        &self.segments
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Tất cả segments đều hardened? (bắt buộc cho ed25519/SLIP-0010)
    pub fn is_fully_hardened(&self) -> bool {
        self.segments.iter().all(|c| c.is_hardened())
    }

    /// Segment đầu tiên không hardened (nếu có) — dùng cho error reporting
    pub fn first_non_hardened(&self) -> Option<&ChildNumber> {
        self.segments.iter().find(|c| !c.is_hardened())
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    /// Parse textual path. Phải bắt đầu bằng `m/` và có ít nhất 1 segment.
    fn from_str(path: &str) -> WalletResult<Self> {
        let path = path.trim();

        let rest = path.strip_prefix("m/").ok_or_else(|| {
            WalletError::Crypto(CryptoError::InvalidPath(format!(
                "Path must start with 'm/': {}",
                path
            )))
        })?;

        if rest.is_empty() {
            return Err(WalletError::Crypto(CryptoError::InvalidPath(
                "Empty derivation path".to_string(),
            )));
        }

        let mut segments = Vec::new();
        for segment in rest.split('/') {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(WalletError::Crypto(CryptoError::InvalidPath(format!(
                    "Empty segment in path: {}",
                    path
                ))));
            }

            let (num_str, hardened) = match segment.strip_suffix('\'') {
                Some(n) => (n, true),
                None => match segment.strip_suffix('h') {
                    Some(n) => (n, true),
                    None => (segment, false),
                },
            };

            let index: u32 = num_str.parse().map_err(|e| {
                WalletError::Crypto(CryptoError::InvalidPath(format!(
                    "Invalid index '{}': {}",
                    num_str, e
                )))
            })?;

            segments.push(ChildNumber::new(index, hardened)?);
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

// =============================================================================
// CHAIN PATH BUILDERS
// =============================================================================

/// Pre-built Derivation Paths cho các chain được hỗ trợ
///
/// # Conventions
/// Cả hai chain dùng dạng all-hardened 4 levels:
/// `m/44'/coin'/walletIndex'/0'` — walletIndex là account slot, mỗi lần
/// "Add Wallet" tiêu thụ một index mới.
pub struct ChainPaths;

impl ChainPaths {
    /// Solana wallet path: `m/44'/501'/{index}'/0'`
    pub fn solana_wallet(index: u32) -> WalletResult<DerivationPath> {
        Self::wallet_path(coin_type::SOLANA, index)
    }

    /// EVM wallet path: `m/44'/60'/{index}'/0'`
    pub fn evm_wallet(index: u32) -> WalletResult<DerivationPath> {
        Self::wallet_path(coin_type::ETHEREUM, index)
    }

    /// BIP-44 all-hardened wallet path cho coin type bất kỳ
    pub fn wallet_path(coin: u32, index: u32) -> WalletResult<DerivationPath> {
        Ok(DerivationPath::new(vec![
            ChildNumber::hardened(44)?,
            ChildNumber::hardened(coin)?,
            ChildNumber::hardened(index)?,
            ChildNumber::hardened(0)?,
        ]))
    }
}

// =============================================================================
// TESTS
// =============================================================================
