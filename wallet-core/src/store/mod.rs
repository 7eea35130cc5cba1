// wallet-core/src/store/mod.rs
//
// Wallet Set Manager - In-Memory Lifecycle cho Derived Wallets
//
// Mỗi chain có một WalletSet: insertion-ordered, public identifier unique,
// next_index monotonic, tối đa MỘT wallet unredacted tại mọi thời điểm.
// Mutation đi qua đúng một control path (&mut) — reader nhận snapshot
// đã validate đầy đủ, không có partial update.

use crate::chains::Chain;
use crate::crypto::key_deriver::KeyDeriver;
use crate::crypto::seed::Seed;
use crate::error::WalletResult;
use crate::network::models::Balance;
use serde::Serialize;
use std::collections::BTreeMap;
use zeroize::Zeroizing;

// =============================================================================
// DERIVED WALLET
// =============================================================================

/// Một wallet đã derive — owned exclusively bởi WalletSet của nó
pub struct DerivedWallet {
    chain: Chain,
    /// Derivation index, cấp một lần, không bao giờ reuse
    path_index: u32,
    derivation_path: String,
    public_identifier: String,
    secret_encoding: Zeroizing<String>,
    /// Secret có đang bị ẩn khỏi display không
    redacted: bool,
    /// Display-only balance (formatted decimal string), set bởi collaborator
    balance: Option<String>,
}

impl DerivedWallet {
    #[inline]
    pub fn chain(&self) -> Chain {
        self.chain
    }

    #[inline]
    pub fn path_index(&self) -> u32 {
        self.path_index
    }

    #[inline]
    pub fn derivation_path(&self) -> &str {
        &self.derivation_path
    }

    #[inline]
    pub fn public_identifier(&self) -> &str {
        &self.public_identifier
    }

    /// Exportable secret encoding — caller tự chịu trách nhiệm về display policy
    #[inline]
    pub fn secret_encoding(&self) -> &str {
        &self.secret_encoding
    }

    #[inline]
    pub fn is_redacted(&self) -> bool {
        self.redacted
    }

    #[inline]
    pub fn balance(&self) -> Option<&str> {
        self.balance.as_deref()
    }
}

// Custom Debug - không hiển thị secret encoding
impl std::fmt::Debug for DerivedWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedWallet")
            .field("chain", &self.chain)
            .field("path_index", &self.path_index)
            .field("derivation_path", &self.derivation_path)
            .field("public_identifier", &self.public_identifier)
            .field("secret_encoding", &"[REDACTED]")
            .field("redacted", &self.redacted)
            .field("balance", &self.balance)
            .finish()
    }
}

/// Snapshot view của một wallet (serde-friendly, cho UI layer)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletExport {
    pub path_index: u32,
    pub derivation_path: String,
    pub public_identifier: String,
    pub secret_encoding: String,
    pub redacted: bool,
    pub balance: Option<String>,
}

// =============================================================================
// ADD OUTCOME
// =============================================================================

/// Kết quả của một lần add_wallet
///
/// Duplicate identifier KHÔNG phải error — nó được log, skip, và index
/// vẫn bị tiêu thụ (retry cùng index không deterministic-safe).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Wallet mới đã được insert (redacted = true)
    Added {
        public_identifier: String,
        path_index: u32,
    },
    /// Identifier đã tồn tại — set không đổi, index vẫn advance
    DuplicateSkipped {
        public_identifier: String,
        path_index: u32,
    },
}

impl AddOutcome {
    #[inline]
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }

    pub fn public_identifier(&self) -> &str {
        match self {
            AddOutcome::Added {
                public_identifier, ..
            }
            | AddOutcome::DuplicateSkipped {
                public_identifier, ..
            } => public_identifier,
        }
    }
}

// =============================================================================
// WALLET SET (per chain)
// =============================================================================

/// Tập wallets của một chain
///
/// # Invariants
/// - `public_identifier` unique trong set
/// - Tối đa một wallet có `redacted == false`
/// - `next_index` không bao giờ giảm (kể cả qua deletions); chỉ `clear`
///   reset về 0
pub struct WalletSet {
    chain: Chain,
    wallets: Vec<DerivedWallet>,
    next_index: u32,
}

impl WalletSet {
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            wallets: Vec::new(),
            next_index: 0,
        }
    }

    #[inline]
    pub fn chain(&self) -> Chain {
        self.chain
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    #[inline]
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Wallets theo insertion order
    #[inline]
    pub fn wallets(&self) -> &[DerivedWallet] {
        &self.wallets
    }

    pub fn get(&self, public_identifier: &str) -> Option<&DerivedWallet> {
        self.wallets
            .iter()
            .find(|w| w.public_identifier == public_identifier)
    }

    /// Wallet đang unredacted (nếu có — tối đa một)
    pub fn visible_wallet(&self) -> Option<&DerivedWallet> {
        self.wallets.iter().find(|w| !w.redacted)
    }

    /// Derive wallet tại next_index và insert nếu identifier chưa tồn tại
    ///
    /// Derivation + materialization hoàn tất TRƯỚC khi counter advance,
    /// nên double-submission chỉ tạo ra hai index liên tiếp khác nhau,
    /// không bao giờ corrupt counter. Derivation error abort cả call —
    /// counter giữ nguyên.
    pub fn add_wallet(&mut self, seed: &Seed) -> WalletResult<AddOutcome> {
        let path_index = self.next_index;
        let path = self.chain.wallet_path(path_index)?;
        let key = KeyDeriver::derive(seed, &path, self.chain.curve())?;
        let materialized = self.chain.materialize(&key)?;

        if self.get(&materialized.public_identifier).is_some() {
            // Collision cực kỳ hiếm; index vẫn bị tiêu thụ — retry cùng
            // index không phải deterministic-safe policy.
            self.next_index += 1;
            tracing::warn!(
                chain = %self.chain,
                path_index,
                identifier = %materialized.public_identifier,
                "Duplicate wallet detected, skipping"
            );
            return Ok(AddOutcome::DuplicateSkipped {
                public_identifier: materialized.public_identifier,
                path_index,
            });
        }

        let wallet = DerivedWallet {
            chain: self.chain,
            path_index,
            derivation_path: path.to_string(),
            public_identifier: materialized.public_identifier.clone(),
            secret_encoding: materialized.secret_encoding,
            redacted: true,
            balance: None,
        };
        self.wallets.push(wallet);
        self.next_index += 1;

        tracing::debug!(
            chain = %self.chain,
            path_index,
            identifier = %materialized.public_identifier,
            "Wallet added"
        );
        Ok(AddOutcome::Added {
            public_identifier: materialized.public_identifier,
            path_index,
        })
    }

    /// Xóa wallet theo identifier. Idempotent — absent identifier là no-op.
    ///
    /// `next_index` không đổi: index không bao giờ được reuse.
    pub fn remove_wallet(&mut self, public_identifier: &str) -> bool {
        let before = self.wallets.len();
        self.wallets
            .retain(|w| w.public_identifier != public_identifier);
        let removed = self.wallets.len() != before;
        if removed {
            tracing::debug!(chain = %self.chain, identifier = %public_identifier, "Wallet removed");
        }
        removed
    }

    /// Toggle redaction của một wallet
    ///
    /// - Đang redacted -> unredact, và MỌI wallet khác bị ép về redacted
    ///   (exclusivity invariant)
    /// - Đang unredacted -> redact lại
    /// - Absent identifier -> no-op, trả false
    pub fn toggle_visibility(&mut self, public_identifier: &str) -> bool {
        let Some(pos) = self
            .wallets
            .iter()
            .position(|w| w.public_identifier == public_identifier)
        else {
            return false;
        };

        if self.wallets[pos].redacted {
            for wallet in &mut self.wallets {
                wallet.redacted = true;
            }
            self.wallets[pos].redacted = false;
        } else {
            self.wallets[pos].redacted = true;
        }
        true
    }

    /// Xóa toàn bộ wallets và reset counter về 0 (set trở về Empty)
    pub fn clear(&mut self) {
        self.wallets.clear();
        self.next_index = 0;
        tracing::debug!(chain = %self.chain, "Wallet set cleared");
    }

    /// Apply kết quả balance lookup (compare-and-set theo identifier)
    ///
    /// - Wallet đã bị xóa trước khi response về -> discard
    /// - Query failure -> balance giữ nguyên (unset), KHÔNG phải error,
    ///   không retry
    pub fn annotate_balance(&mut self, public_identifier: &str, result: WalletResult<Balance>) {
        let Some(wallet) = self
            .wallets
            .iter_mut()
            .find(|w| w.public_identifier == public_identifier)
        else {
            tracing::warn!(
                chain = %self.chain,
                identifier = %public_identifier,
                "Balance response for absent wallet discarded"
            );
            return;
        };

        match result {
            Ok(balance) => wallet.balance = Some(balance.formatted),
            Err(err) => {
                tracing::warn!(
                    chain = %self.chain,
                    identifier = %public_identifier,
                    error = %err,
                    "Balance query failed, balance stays unknown"
                );
            }
        }
    }

    /// Snapshot đã validate đầy đủ cho UI — mutation không bao giờ expose
    /// partial state
    pub fn snapshot(&self) -> Vec<WalletExport> {
        self.wallets
            .iter()
            .map(|w| WalletExport {
                path_index: w.path_index,
                derivation_path: w.derivation_path.clone(),
                public_identifier: w.public_identifier.clone(),
                secret_encoding: w.secret_encoding.to_string(),
                redacted: w.redacted,
                balance: w.balance.clone(),
            })
            .collect()
    }
}

// =============================================================================
// WALLET SET MANAGER (multi-chain)
// =============================================================================

/// Quản lý một WalletSet cho mỗi chain (tạo lazily)
pub struct WalletSetManager {
    sets: BTreeMap<Chain, WalletSet>,
}

impl WalletSetManager {
    pub fn new() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }

    /// Lấy set của chain (None nếu chưa có wallet nào)
    pub fn set(&self, chain: Chain) -> Option<&WalletSet> {
        self.sets.get(&chain)
    }

    fn set_mut(&mut self, chain: Chain) -> &mut WalletSet {
        self.sets.entry(chain).or_insert_with(|| WalletSet::new(chain))
    }

    pub fn add_wallet(&mut self, chain: Chain, seed: &Seed) -> WalletResult<AddOutcome> {
        self.set_mut(chain).add_wallet(seed)
    }

    pub fn remove_wallet(&mut self, chain: Chain, public_identifier: &str) -> bool {
        match self.sets.get_mut(&chain) {
            Some(set) => set.remove_wallet(public_identifier),
            None => false,
        }
    }

    pub fn toggle_visibility(&mut self, chain: Chain, public_identifier: &str) -> bool {
        match self.sets.get_mut(&chain) {
            Some(set) => set.toggle_visibility(public_identifier),
            None => false,
        }
    }

    pub fn clear(&mut self, chain: Chain) {
        if let Some(set) = self.sets.get_mut(&chain) {
            set.clear();
        }
    }

    pub fn annotate_balance(
        &mut self,
        chain: Chain,
        public_identifier: &str,
        result: WalletResult<Balance>,
    ) {
        self.set_mut(chain).annotate_balance(public_identifier, result);
    }

    pub fn snapshot(&self, chain: Chain) -> Vec<WalletExport> {
        self.sets
            .get(&chain)
            .map(WalletSet::snapshot)
            .unwrap_or_default()
    }
}

impl Default for WalletSetManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NetworkError, WalletError};

    const TEST_SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    fn seed() -> Seed {
        Seed::from_hex(TEST_SEED).unwrap()
    }

    fn populated_set(chain: Chain, count: usize) -> WalletSet {
        let seed = seed();
        let mut set = WalletSet::new(chain);
        for _ in 0..count {
            assert!(set.add_wallet(&seed).unwrap().is_added());
        }
        set
    }

    #[test]
    fn test_add_assigns_consecutive_indices() {
        let set = populated_set(Chain::Solana, 3);
        assert_eq!(set.len(), 3);
        assert_eq!(set.next_index(), 3);

        let indices: Vec<u32> = set.wallets().iter().map(|w| w.path_index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(set.wallets()[1].derivation_path(), "m/44'/501'/1'/0'");
    }

    #[test]
    fn test_add_distinct_identifiers() {
        let set = populated_set(Chain::Ethereum, 5);
        let mut ids: Vec<&str> = set
            .wallets()
            .iter()
            .map(|w| w.public_identifier())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_new_wallet_starts_redacted() {
        let set = populated_set(Chain::Solana, 2);
        assert!(set.wallets().iter().all(|w| w.is_redacted()));
        assert!(set.visible_wallet().is_none());
    }

    #[test]
    fn test_duplicate_skipped_but_index_consumed() {
        let seed = seed();
        let mut set = populated_set(Chain::Solana, 1);

        // Ép derivation lặp lại index 0: identifier trùng với wallet có sẵn
        set.next_index = 0;
        let outcome = set.add_wallet(&seed).unwrap();

        assert!(matches!(outcome, AddOutcome::DuplicateSkipped { .. }));
        assert_eq!(set.len(), 1); // Set không đổi
        assert_eq!(set.next_index(), 1); // Index vẫn bị tiêu thụ
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut set = populated_set(Chain::Ethereum, 2);
        let id = set.wallets()[0].public_identifier().to_string();

        assert!(set.remove_wallet(&id));
        assert!(!set.remove_wallet(&id)); // Lần hai: no-op
        assert!(!set.remove_wallet("not-a-wallet"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_does_not_touch_counter() {
        let mut set = populated_set(Chain::Solana, 3);
        let id = set.wallets()[1].public_identifier().to_string();

        set.remove_wallet(&id);
        assert_eq!(set.next_index(), 3);

        // Wallet tiếp theo lấy index 3, không reuse index 1 đã xóa
        set.add_wallet(&seed()).unwrap();
        let indices: Vec<u32> = set.wallets().iter().map(|w| w.path_index()).collect();
        assert_eq!(indices, vec![0, 2, 3]);
    }

    #[test]
    fn test_remove_visible_wallet_leaves_none_visible() {
        let mut set = populated_set(Chain::Solana, 2);
        let id = set.wallets()[0].public_identifier().to_string();

        set.toggle_visibility(&id);
        assert!(set.visible_wallet().is_some());

        set.remove_wallet(&id);
        assert!(set.visible_wallet().is_none());
    }

    #[test]
    fn test_toggle_visibility_is_involutive() {
        let mut set = populated_set(Chain::Ethereum, 1);
        let id = set.wallets()[0].public_identifier().to_string();

        assert!(set.toggle_visibility(&id));
        assert!(!set.get(&id).unwrap().is_redacted());

        assert!(set.toggle_visibility(&id));
        assert!(set.get(&id).unwrap().is_redacted());
    }

    #[test]
    fn test_toggle_visibility_exclusive() {
        let mut set = populated_set(Chain::Solana, 3);
        let id_a = set.wallets()[0].public_identifier().to_string();
        let id_b = set.wallets()[1].public_identifier().to_string();

        set.toggle_visibility(&id_a);
        // Mở B trong khi A đang visible -> A bị ẩn lại
        set.toggle_visibility(&id_b);

        assert!(set.get(&id_a).unwrap().is_redacted());
        assert!(!set.get(&id_b).unwrap().is_redacted());
        assert_eq!(
            set.wallets().iter().filter(|w| !w.is_redacted()).count(),
            1
        );
    }

    #[test]
    fn test_toggle_visibility_absent_is_noop() {
        let mut set = populated_set(Chain::Solana, 1);
        assert!(!set.toggle_visibility("missing"));
        assert!(set.visible_wallet().is_none());
    }

    #[test]
    fn test_clear_resets_to_empty() {
        let mut set = populated_set(Chain::Ethereum, 3);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.next_index(), 0);

        // Sau clear, derivation bắt đầu lại từ index 0
        let outcome = set.add_wallet(&seed()).unwrap();
        assert_eq!(set.wallets()[0].path_index(), 0);
        assert!(outcome.is_added());
    }

    #[test]
    fn test_annotate_balance_sets_display_string() {
        let mut set = populated_set(Chain::Ethereum, 1);
        let id = set.wallets()[0].public_identifier().to_string();

        set.annotate_balance(&id, Ok(Balance::new("1500000000000000000", 18, "ETH")));
        assert_eq!(set.get(&id).unwrap().balance(), Some("1.5"));
    }

    #[test]
    fn test_annotate_balance_failure_leaves_unset() {
        let mut set = populated_set(Chain::Ethereum, 1);
        let id = set.wallets()[0].public_identifier().to_string();

        set.annotate_balance(
            &id,
            Err(WalletError::Network(NetworkError::BalanceQuery(
                "rpc timeout".to_string(),
            ))),
        );
        assert_eq!(set.get(&id).unwrap().balance(), None);
    }

    #[test]
    fn test_annotate_balance_discards_after_delete() {
        let mut set = populated_set(Chain::Solana, 1);
        let id = set.wallets()[0].public_identifier().to_string();

        // Wallet bị xóa trước khi async response về
        set.remove_wallet(&id);
        set.annotate_balance(&id, Ok(Balance::new("1000000000", 9, "SOL")));
        assert!(set.get(&id).is_none());
    }

    #[test]
    fn test_annotate_balance_never_touches_invariants() {
        let mut set = populated_set(Chain::Solana, 2);
        let id = set.wallets()[0].public_identifier().to_string();
        set.toggle_visibility(&id);

        set.annotate_balance(&id, Ok(Balance::new("5", 9, "SOL")));
        assert_eq!(set.next_index(), 2);
        assert!(!set.get(&id).unwrap().is_redacted());
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let set = populated_set(Chain::Ethereum, 1);
        let snapshot = set.snapshot();
        assert_eq!(snapshot.len(), 1);

        let json = serde_json::to_string(&snapshot[0]).unwrap();
        assert!(json.contains("\"pathIndex\":0"));
        assert!(json.contains("\"derivationPath\":\"m/44'/60'/0'/0'\""));
        assert!(json.contains("\"redacted\":true"));
        assert!(json.contains("\"balance\":null"));
    }

    #[test]
    fn test_manager_routes_per_chain() {
        let seed = seed();
        let mut manager = WalletSetManager::new();

        manager.add_wallet(Chain::Solana, &seed).unwrap();
        manager.add_wallet(Chain::Ethereum, &seed).unwrap();
        manager.add_wallet(Chain::Solana, &seed).unwrap();

        assert_eq!(manager.set(Chain::Solana).unwrap().len(), 2);
        assert_eq!(manager.set(Chain::Ethereum).unwrap().len(), 1);
        // Counter độc lập per chain
        assert_eq!(manager.set(Chain::Solana).unwrap().next_index(), 2);
        assert_eq!(manager.set(Chain::Ethereum).unwrap().next_index(), 1);
    }

    #[test]
    fn test_manager_ops_on_missing_chain_are_noops() {
        let mut manager = WalletSetManager::new();
        assert!(!manager.remove_wallet(Chain::Solana, "x"));
        assert!(!manager.toggle_visibility(Chain::Ethereum, "x"));
        manager.clear(Chain::Solana);
        assert!(manager.snapshot(Chain::Solana).is_empty());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let set = populated_set(Chain::Solana, 1);
        let debug_output = format!("{:?}", set.wallets()[0]);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains(set.wallets()[0].secret_encoding()));
    }
}
