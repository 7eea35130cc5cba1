// wallet-core/src/clipboard.rs
//
// Clipboard Collaborator - Fallback Chain
//
// Copy secret/address ra clipboard là việc của platform layer; core chỉ
// định nghĩa contract + fallback policy: thử primary mechanism trước,
// rồi legacy mechanism, chỉ surface failure khi đã hết cách.

use crate::error::{ClipboardError, WalletError, WalletResult};

/// Một cơ chế clipboard cụ thể (async Clipboard API, legacy
/// selection-based copy, OS clipboard, ...)
pub trait ClipboardMechanism {
    /// Tên mechanism (cho error message)
    fn name(&self) -> &str;

    /// Copy text. Err = mechanism này không khả dụng/thất bại —
    /// chain sẽ thử mechanism tiếp theo.
    fn copy(&mut self, text: &str) -> Result<(), String>;
}

/// Fallback chain: thử các mechanisms theo thứ tự đăng ký
///
/// Chỉ trả [`ClipboardError::AllMechanismsFailed`] (kèm danh sách đã thử)
/// sau khi mọi mechanism đều fail — user nhận một actionable message,
/// không phải N lỗi rời rạc.
pub struct ClipboardChain {
    mechanisms: Vec<Box<dyn ClipboardMechanism>>,
}

impl ClipboardChain {
    pub fn new() -> Self {
        Self {
            mechanisms: Vec::new(),
        }
    }

    /// Đăng ký mechanism (thứ tự đăng ký = thứ tự thử)
    pub fn with_mechanism(mut self, mechanism: Box<dyn ClipboardMechanism>) -> Self {
        self.mechanisms.push(mechanism);
        self
    }

    /// Copy text, fallback qua từng mechanism
    pub fn copy(&mut self, text: &str) -> WalletResult<()> {
        let mut attempts = Vec::with_capacity(self.mechanisms.len());

        for mechanism in &mut self.mechanisms {
            match mechanism.copy(text) {
                Ok(()) => return Ok(()),
                Err(reason) => {
                    tracing::debug!(
                        mechanism = mechanism.name(),
                        reason = %reason,
                        "Clipboard mechanism failed, trying next"
                    );
                    attempts.push(mechanism.name().to_string());
                }
            }
        }

        Err(WalletError::Clipboard(ClipboardError::AllMechanismsFailed {
            attempts: attempts.join(", "),
        }))
    }
}

impl Default for ClipboardChain {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
