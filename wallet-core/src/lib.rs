// wallet-core/src/lib.rs

//! # walletgen-core
//!
//! Deterministic multi-chain HD wallet core: một recovery phrase sinh ra
//! key pairs cho nhiều blockchain, cùng một in-memory wallet-set manager
//! (add / dedup / redact / remove).
//!
//! ## Pipeline
//!
//! ```text
//! phrase ──► WalletMnemonic::to_seed ──► KeyDeriver::derive(seed, path)
//!        ──► Chain::materialize(key) ──► WalletSet::add_wallet
//! ```
//!
//! ## Modules
//!
//! - [`crypto`] — BIP-39 mnemonic, PBKDF2 seed, hardened HD derivation
//!   (BIP-32 secp256k1 / SLIP-0010 ed25519), typed derivation paths
//! - [`chains`] — chain adapters: Solana (base58), Ethereum (EIP-55)
//! - [`store`] — wallet-set lifecycle với các invariants: identifier
//!   unique, tối đa một secret visible, derivation index monotonic
//! - [`network`] — async balance collaborator contract
//! - [`clipboard`] — clipboard collaborator với fallback chain
//! - [`session`] — facade cho một phiên ví (mnemonic + seed + sets)
//!
//! Không có persistence: mnemonic, seed và secrets chỉ sống trong memory
//! và bị zeroize khi drop.

pub mod chains;
pub mod clipboard;
pub mod crypto;
pub mod error;
pub mod network;
pub mod session;
pub mod store;

// Re-exports for cleaner API access
pub use chains::{Chain, MaterializedKey};
pub use clipboard::{ClipboardChain, ClipboardMechanism};
pub use crypto::{
    ChainPaths, CurveType, DerivationPath, ExtendedKey, KeyDeriver, Seed, WalletMnemonic,
    WordCount,
};
pub use error::{
    ClipboardError, CryptoError, MnemonicError, NetworkError, WalletError, WalletResult,
};
pub use network::{Balance, BalanceProvider};
pub use session::WalletSession;
pub use store::{AddOutcome, DerivedWallet, WalletExport, WalletSet, WalletSetManager};
