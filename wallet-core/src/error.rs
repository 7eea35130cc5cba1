use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Network Error: {0}")]
    Network(#[from] NetworkError),

    #[error("Clipboard Error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("Validation Error: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("Invalid entropy length: {0} bytes. Expected 16, 20, 24, 28 or 32.")]
    InvalidEntropyLength(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Non-hardened segment '{0}' is not supported on this curve")]
    NonHardenedSegment(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),
}

/// Lỗi từ balance collaborator — luôn non-fatal, không retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Balance query failed: {0}")]
    BalanceQuery(String),
}

/// Lỗi clipboard — chỉ surface sau khi đã thử hết fallback chain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("All clipboard mechanisms failed (tried: {attempts})")]
    AllMechanismsFailed { attempts: String },
}
