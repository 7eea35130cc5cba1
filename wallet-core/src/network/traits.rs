// wallet-core/src/network/traits.rs

// Balance Provider Trait - Chain-Agnostic Collaborator Interface
//
// Core này KHÔNG sở hữu RPC endpoint hay network selection nào —
// balance lookup là external collaborator. Trait này chỉ định nghĩa
// contract: query theo public identifier, async, không retry.

use crate::chains::Chain;
use crate::error::WalletResult;
use crate::network::models::Balance;
use async_trait::async_trait;

/// BalanceProvider - Interface cho balance collaborator
///
/// # Design Principles
/// - **Chain-Agnostic**: address là string, balance là display model
/// - **Async-First**: network operation duy nhất được phép suspend
/// - **No Retry**: lỗi surface là [`NetworkError::BalanceQuery`]
///   (non-fatal, "balance unknown"), caller không retry
///
/// [`NetworkError::BalanceQuery`]: crate::error::NetworkError::BalanceQuery
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    /// Chain mà provider này phục vụ
    fn chain(&self) -> Chain;

    /// Lấy số dư native token (ETH, SOL)
    ///
    /// # Arguments
    /// * `public_identifier` - Địa chỉ cần query
    ///
    /// # Returns
    /// Balance với raw value, formatted value, và symbol.
    /// Mỗi wallet query độc lập — không có ordering guarantee giữa các calls.
    async fn query_balance(&self, public_identifier: &str) -> WalletResult<Balance>;
}
