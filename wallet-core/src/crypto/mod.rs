// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! This module implements the fundamental cryptographic operations for a multi-chain wallet:
//!
//! - **Mnemonic Generation**: Explicit BIP-39 phrases (12..24 words) via [`WalletMnemonic`].
//! - **Seed Stretching**: PBKDF2-HMAC-SHA512 into the 64-byte [`Seed`].
//! - **Key Derivation**: Explicit hardened derivation for Secp256k1 (Ethereum/EVM, BIP-32)
//!   and Ed25519 (Solana, SLIP-0010) via [`KeyDeriver`].
//! - **Derivation Paths**: Typed [`DerivationPath`] model plus [`ChainPaths`] builders.

pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod seed;

// Re-exports for cleaner API access
pub use key_deriver::{CurveType, Ed25519Deriver, ExtendedKey, KeyDeriver, Secp256k1Deriver};
pub use mnemonic::{WalletMnemonic, WordCount};
pub use paths::{ChainPaths, ChildNumber, DerivationPath};
pub use seed::Seed;
