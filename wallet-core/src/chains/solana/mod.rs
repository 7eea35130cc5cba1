// wallet-core/src/chains/solana/mod.rs

//! Solana Chain Support
//!
//! Ed25519 keypair expansion and base58 address encoding via [`SolanaAddress`].

pub mod address;

// Re-exports for cleaner API access
pub use address::SolanaAddress;
