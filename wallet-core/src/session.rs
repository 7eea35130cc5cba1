// wallet-core/src/session.rs
//
// Wallet Session - Facade cho một phiên làm việc
//
// Mnemonic/Seed được tạo đúng một lần mỗi session, chỉ sống trong memory,
// và bị zeroize khi session drop. Không có persistence nào ở layer này.

use crate::chains::Chain;
use crate::crypto::mnemonic::{WalletMnemonic, WordCount};
use crate::crypto::seed::Seed;
use crate::error::WalletResult;
use crate::network::traits::BalanceProvider;
use crate::store::{AddOutcome, WalletExport, WalletSet, WalletSetManager};

/// Một phiên ví: mnemonic + seed + wallet sets
///
/// # Lifecycle
/// - `generate` / `restore` tạo session (seed được stretch đúng 1 lần)
/// - Mọi set operation đi qua session (single control path)
/// - Drop session = mnemonic/seed/secrets bị zeroize, không còn dấu vết
pub struct WalletSession {
    mnemonic: WalletMnemonic,
    seed: Seed,
    manager: WalletSetManager,
}

impl WalletSession {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Tạo session mới với mnemonic ngẫu nhiên
    pub fn generate(word_count: WordCount, passphrase: Option<&str>) -> Self {
        let mnemonic = WalletMnemonic::with_word_count(word_count);
        let seed = mnemonic.to_seed(passphrase);
        Self {
            mnemonic,
            seed,
            manager: WalletSetManager::new(),
        }
    }

    /// Khôi phục session từ phrase có sẵn
    ///
    /// Phrase không hợp lệ (unknown word / bad checksum) là fatal cho
    /// import attempt — error được propagate, không silently continue.
    pub fn restore(phrase: &str, passphrase: Option<&str>) -> WalletResult<Self> {
        let mnemonic = WalletMnemonic::from_phrase(phrase)?;
        let seed = mnemonic.to_seed(passphrase);
        Ok(Self {
            mnemonic,
            seed,
            manager: WalletSetManager::new(),
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Recovery phrase của session (để hiển thị cho user backup)
    #[inline]
    pub fn phrase(&self) -> &str {
        self.mnemonic.phrase()
    }

    /// Wallet set của chain (None nếu chưa add wallet nào)
    #[inline]
    pub fn set(&self, chain: Chain) -> Option<&WalletSet> {
        self.manager.set(chain)
    }

    // =========================================================================
    // SET OPERATIONS
    // =========================================================================

    /// Derive và thêm wallet tiếp theo cho chain
    pub fn add_wallet(&mut self, chain: Chain) -> WalletResult<AddOutcome> {
        self.manager.add_wallet(chain, &self.seed)
    }

    /// Xóa wallet (idempotent)
    pub fn remove_wallet(&mut self, chain: Chain, public_identifier: &str) -> bool {
        self.manager.remove_wallet(chain, public_identifier)
    }

    /// Toggle hiển thị secret của một wallet
    pub fn toggle_visibility(&mut self, chain: Chain, public_identifier: &str) -> bool {
        self.manager.toggle_visibility(chain, public_identifier)
    }

    /// Xóa toàn bộ wallets của chain, reset counter
    pub fn clear(&mut self, chain: Chain) {
        self.manager.clear(chain);
    }

    /// Snapshot cho UI
    pub fn wallets(&self, chain: Chain) -> Vec<WalletExport> {
        self.manager.snapshot(chain)
    }

    // =========================================================================
    // BALANCE COLLABORATOR BRIDGE
    // =========================================================================

    /// Query balance qua collaborator rồi apply vào wallet record
    ///
    /// Lookup là async và không block các set operations khác; kết quả
    /// được compare-and-set theo identifier — nếu wallet đã bị xóa trong
    /// lúc chờ response, response bị discard. Failure chỉ để balance
    /// ở trạng thái unknown, không phải fatal error.
    pub async fn refresh_balance(
        &mut self,
        provider: &dyn BalanceProvider,
        public_identifier: &str,
    ) {
        let chain = provider.chain();
        let result = provider.query_balance(public_identifier).await;
        self.manager
            .annotate_balance(chain, public_identifier, result);
    }
}

// Custom Debug - không hiển thị phrase/seed
impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("mnemonic", &self.mnemonic)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================
