// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - Explicit BIP-39 Implementation
// Chuẩn: BIP-39 (Entropy + Checksum -> Words), PBKDF2-HMAC-SHA512 (Seed Derivation)
//
// Toàn bộ encode/decode/checksum được implement trực tiếp ở byte level.
// Crate `bip39` chỉ còn cung cấp English wordlist (2048 từ, sorted) —
// không còn black-box parsing.

use crate::crypto::seed::Seed;
use crate::error::{MnemonicError, WalletError, WalletResult};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// English wordlist chuẩn BIP-39 (2048 từ, sorted alphabetically)
#[inline]
fn wordlist() -> &'static [&'static str] {
    bip39::Language::English.words_by_prefix("")
}

/// Tìm index của word trong wordlist (binary search — list đã sorted,
/// ASCII nên so sánh bytes = so sánh lexicographic)
#[inline]
fn word_index(word: &str) -> Option<u16> {
    wordlist()
        .binary_search_by(|entry| entry.as_bytes().cmp(word.as_bytes()))
        .ok()
        .map(|i| i as u16)
}

/// Số lượng words hỗ trợ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    /// Lấy số bytes entropy cần thiết
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::Fifteen => 20,
            WordCount::Eighteen => 24,
            WordCount::TwentyOne => 28,
            WordCount::TwentyFour => 32,
        }
    }

    /// Lấy số bits entropy (128..256)
    #[inline]
    pub const fn entropy_bits(self) -> usize {
        self.entropy_bytes() * 8
    }
}

/// Wallet Mnemonic - Explicit BIP-39 Implementation
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: Phrase được tự động ghi đè bằng 0 khi struct bị drop
/// - **CSPRNG**: Sử dụng `OsRng` (OS-level cryptographically secure RNG)
/// - **No Debug Leak**: Custom Debug impl không hiển thị phrase
///
/// # Encoding
/// - ENT bits entropy + ENT/32 bits checksum (high bits của SHA-256(entropy))
/// - Mỗi 11-bit group map vào 1 wordlist entry
/// - Word count = (ENT + CS) / 11
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị mnemonic phrase
impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Tạo mnemonic mới với 12 words (128-bit entropy)
    ///
    /// Phù hợp cho hầu hết use cases. Cân bằng giữa bảo mật và tiện dụng.
    pub fn new() -> Self {
        Self::with_word_count(WordCount::Twelve)
    }

    /// Tạo mnemonic mới với 24 words (256-bit entropy)
    ///
    /// Bảo mật cao nhất, khuyến nghị cho ví chứa số lượng lớn.
    pub fn new_24_words() -> Self {
        Self::with_word_count(WordCount::TwentyFour)
    }

    /// Tạo mnemonic với số lượng words tùy chỉnh
    ///
    /// # Arguments
    /// * `word_count` - Số lượng words (12, 15, 18, 21, hoặc 24)
    pub fn with_word_count(word_count: WordCount) -> Self {
        let entropy_size = word_count.entropy_bytes();

        // Stack-allocated entropy buffer (max 32 bytes)
        let mut entropy = [0u8; 32];
        OsRng.fill_bytes(&mut entropy[..entropy_size]);

        let mnemonic = Self::from_entropy(&entropy[..entropy_size])
            .expect("entropy buffer has a supported length");

        // Zeroize entropy ngay sau khi sử dụng
        entropy.zeroize();

        mnemonic
    }

    /// Encode entropy thành mnemonic phrase (deterministic)
    ///
    /// # Algorithm (BIP-39)
    /// 1. CS = ENT / 32 bits, lấy từ high bits của SHA-256(entropy)
    /// 2. Bit stream = entropy ‖ checksum
    /// 3. Mỗi 11-bit group -> 1 word index (0..2047)
    ///
    /// # Arguments
    /// * `entropy` - 16, 20, 24, 28 hoặc 32 bytes
    pub fn from_entropy(entropy: &[u8]) -> WalletResult<Self> {
        if !matches!(entropy.len(), 16 | 20 | 24 | 28 | 32) {
            return Err(WalletError::Mnemonic(MnemonicError::InvalidEntropyLength(
                entropy.len(),
            )));
        }

        let checksum_bits = entropy.len() / 4; // ENT/32, luôn <= 8 bits
        let word_count = (entropy.len() * 8 + checksum_bits) / 11;
        let hash = Sha256::digest(entropy);

        // Bit stream: entropy ‖ byte đầu của hash (đủ vì CS <= 8 bits)
        let mut stream = Vec::with_capacity(entropy.len() + 1);
        stream.extend_from_slice(entropy);
        stream.push(hash[0]);

        let list = wordlist();
        let mut words = Vec::with_capacity(word_count);
        for w in 0..word_count {
            words.push(list[extract_11_bits(&stream, w * 11) as usize]);
        }

        let phrase = words.join(" ");
        stream.zeroize();

        Ok(Self { phrase, word_count })
    }

    /// Khôi phục mnemonic từ phrase có sẵn
    ///
    /// # Validation
    /// - Kiểm tra số lượng words (12, 15, 18, 21, 24)
    /// - Kiểm tra từng word có trong BIP-39 wordlist
    /// - Decode ngược về entropy và recompute checksum — mismatch là fatal,
    ///   không bao giờ silently continue
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        // Normalize whitespace và count words
        let normalized = phrase.split_whitespace().collect::<Vec<_>>();
        let count = normalized.len();

        if !matches!(count, 12 | 15 | 18 | 21 | 24) {
            return Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(
                count,
            )));
        }

        // Words -> 11-bit indices
        let mut indices = Vec::with_capacity(count);
        for word in &normalized {
            let idx = word_index(word).ok_or_else(|| {
                WalletError::Mnemonic(MnemonicError::UnknownWord(word.to_string()))
            })?;
            indices.push(idx);
        }

        Self::verify_checksum(&indices)?;

        Ok(Self {
            phrase: normalized.join(" "),
            word_count: count,
        })
    }

    /// Recompute checksum từ decoded entropy, so với checksum bits trong phrase
    fn verify_checksum(indices: &[u16]) -> WalletResult<()> {
        let total_bits = indices.len() * 11;
        let entropy_bits = total_bits * 32 / 33;
        let checksum_bits = total_bits - entropy_bits;
        let entropy_bytes = entropy_bits / 8;

        // Pack indices ngược lại thành bit stream
        let mut stream = vec![0u8; entropy_bytes + 1];
        for (w, idx) in indices.iter().enumerate() {
            for b in 0..11 {
                if idx & (1 << (10 - b)) != 0 {
                    let pos = w * 11 + b;
                    stream[pos / 8] |= 1 << (7 - pos % 8);
                }
            }
        }

        let hash = Sha256::digest(&stream[..entropy_bytes]);
        let embedded = stream[entropy_bytes] >> (8 - checksum_bits);
        let expected = hash[0] >> (8 - checksum_bits);

        stream.zeroize();

        if embedded != expected {
            return Err(WalletError::Mnemonic(MnemonicError::ChecksumFailed));
        }
        Ok(())
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Lấy mnemonic phrase
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Lấy số lượng words
    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Lấy danh sách các words
    pub fn words(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    /// Lấy strength (bit) của mnemonic
    pub fn strength_bits(&self) -> usize {
        self.word_count * 32 / 3
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// Tạo seed từ mnemonic (PBKDF2-HMAC-SHA512, 2048 iterations)
    ///
    /// Password = phrase, salt = "mnemonic" + passphrase, output 64 bytes.
    /// Pure function: cùng (phrase, passphrase) luôn cho cùng seed,
    /// không giữ secret state giữa các lần gọi.
    ///
    /// # Arguments
    /// * `passphrase` - Optional BIP-39 passphrase (thêm layer bảo mật)
    ///
    /// # Security Note
    /// Passphrase khác với password. Nếu mất passphrase, không thể khôi phục ví
    /// ngay cả khi có mnemonic phrase.
    pub fn to_seed(&self, passphrase: Option<&str>) -> Seed {
        let mut salt = String::from("mnemonic");
        salt.push_str(passphrase.unwrap_or(""));

        let mut output = [0u8; 64];
        pbkdf2::pbkdf2_hmac::<Sha512>(
            self.phrase.as_bytes(),
            salt.as_bytes(),
            2048,
            &mut output,
        );

        salt.zeroize();
        let seed = Seed::from_bytes(output);
        output.zeroize();
        seed
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Kiểm tra xem phrase có hợp lệ không
    ///
    /// Thực hiện đầy đủ validation: word count, wordlist, checksum
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }

    /// Kiểm tra một từ có trong BIP-39 English wordlist không
    #[inline]
    pub fn is_valid_word(word: &str) -> bool {
        word_index(word).is_some()
    }
}

// Default implementation
impl Default for WalletMnemonic {
    fn default() -> Self {
        Self::new()
    }
}

/// Đọc 11 bits từ bit stream (big-endian bit order) bắt đầu tại `bit_off`
fn extract_11_bits(bytes: &[u8], bit_off: usize) -> u16 {
    let mut value = 0u16;
    for i in 0..11 {
        let pos = bit_off + i;
        let bit = (bytes[pos / 8] >> (7 - pos % 8)) & 1;
        value = (value << 1) | bit as u16;
    }
    value
}

// =============================================================================
// UNIT TESTS
// =============================================================================
