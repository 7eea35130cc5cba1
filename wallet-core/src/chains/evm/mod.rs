// wallet-core/src/chains/evm/mod.rs

//! Ethereum Virtual Machine (EVM) Chain Support
//!
//! Address derivation for Ethereum and EVM-compatible chains:
//! explicit EIP-55 checksummed addresses via [`EvmAddress`].

pub mod address;

// Re-exports for cleaner API access
pub use address::EvmAddress;
