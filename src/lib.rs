//! PNMark - PCM 音频来源标记
//!
//! 把 RSA 签名展开为双极性 PN 序列，按固定步长写入 PCM 样本；提取时按同一步长读回、
//! 还原签名并验证，用于证明来源或发现篡改。
//!
//! # 流程
//!
//! ```text
//! message ─sign─▶ signature ─codec─▶ PN (±1) ─embed─▶ samples[0], samples[f], ...
//!                                                        f = floor(len / pn_len)
//! samples ─extract(len)─▶ PN ─codec⁻¹─▶ signature ─verify─▶ pass / SignatureMismatch
//! ```
//!
//! 嵌入是直接覆写样本（可见标记），不是感知透明的扩频水印。
//!
//! # Example
//!
//! ```
//! use pnmark::{SampleBuffer, SampleFormat, Watermark};
//!
//! let signature = [0xA5u8, 0x3C];
//! let pn = Watermark::to_pn(&signature);
//! assert_eq!(pn.len(), 16);
//!
//! let mut buffer = SampleBuffer::new(vec![100; 160], 8000, 1, SampleFormat::Int16).unwrap();
//! let length = Watermark::embed(&mut buffer, &pn).unwrap();
//!
//! let extracted = Watermark::extract(&buffer, length).unwrap();
//! assert_eq!(Watermark::from_pn(&extracted).unwrap(), signature);
//! ```

pub mod binder;
pub mod codec;
pub mod error;
pub mod sample;
pub mod watermark;

#[cfg(feature = "app")]
pub mod app;
#[cfg(feature = "app")]
pub mod media;

// Re-exports
pub use binder::{Receipt, DEFAULT_KEY_BITS};
pub use error::{Error, Result};
pub use sample::{SampleBuffer, SampleFormat};
pub use watermark::{MarkHeader, HEADER_LEN};

/// 编解码与嵌入/提取的便捷入口
pub struct Watermark;

impl Watermark {
    /// 签名 → PN 序列
    #[must_use]
    pub fn to_pn(signature: &[u8]) -> Vec<i32> {
        codec::signature_to_pn(signature)
    }

    /// PN 序列 → 签名
    pub fn from_pn(pn: &[i32]) -> Result<Vec<u8>> {
        codec::pn_to_signature(pn)
    }

    /// 符号间隔
    pub fn stride(buffer_len: usize, pn_len: usize) -> Result<usize> {
        watermark::stride(buffer_len, pn_len)
    }

    /// 嵌入，返回符号数
    pub fn embed(buffer: &mut SampleBuffer, pn: &[i32]) -> Result<usize> {
        watermark::embed(buffer, pn)
    }

    /// 提取并校验符号
    pub fn extract(buffer: &SampleBuffer, length: usize) -> Result<Vec<i32>> {
        watermark::extract_symbols(buffer, length)
    }
}
