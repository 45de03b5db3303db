//! 嵌入头
//!
//! 记录嵌入时的符号数、步长与载体样本数，使提取不再依赖调用方记住长度，
//! 并能发现载体被重新编码（样本数变化）的情况。
//!
//! 格式 (26 bytes, big-endian):
//!
//! ```text
//! ┌───────┬─────────┬────────┬──────────────┬────────┬──────────────┬───────┐
//! │ Magic │ Version │ Format │ Symbol count │ Stride │ Sample count │ Check │
//! │   4   │    1    │   1    │      4       │   4    │      8       │   4   │
//! └───────┴─────────┴────────┴──────────────┴────────┴──────────────┴───────┘
//! ```
//!
//! Check = SHA-256(前 22 字节) 的前 4 字节。

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::sample::SampleFormat;

/// 头部长度 (bytes)
pub const HEADER_LEN: usize = 26;

/// 头部魔数
pub const HEADER_MAGIC: [u8; 4] = *b"PNMK";

/// 当前头部版本
pub const HEADER_VERSION: u8 = 1;

const CHECK_LEN: usize = 4;
const BODY_LEN: usize = HEADER_LEN - CHECK_LEN;

/// 嵌入参数记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkHeader {
    /// 已嵌入的符号数
    pub symbol_count: u32,
    /// 嵌入步长
    pub stride: u32,
    /// 嵌入时载体的样本总数
    pub sample_count: u64,
    /// 嵌入时载体的样本格式
    pub sample_format: SampleFormat,
}

impl MarkHeader {
    /// 由长度信息构造
    ///
    /// # Errors
    /// 数值超出字段宽度时返回 [`Error::InvalidInput`]。
    pub fn new(
        symbol_count: usize,
        stride: usize,
        sample_count: usize,
        sample_format: SampleFormat,
    ) -> Result<Self> {
        let overflow = |field: &str| Error::InvalidInput(format!("{field} overflows header field"));
        Ok(Self {
            symbol_count: u32::try_from(symbol_count).map_err(|_| overflow("symbol_count"))?,
            stride: u32::try_from(stride).map_err(|_| overflow("stride"))?,
            sample_count: u64::try_from(sample_count).map_err(|_| overflow("sample_count"))?,
            sample_format,
        })
    }

    /// 符号数
    #[must_use]
    pub fn symbol_len(&self) -> usize {
        self.symbol_count as usize
    }

    /// 编码为 26 字节
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&HEADER_MAGIC);
        out[4] = HEADER_VERSION;
        out[5] = format_code(self.sample_format);
        out[6..10].copy_from_slice(&self.symbol_count.to_be_bytes());
        out[10..14].copy_from_slice(&self.stride.to_be_bytes());
        out[14..22].copy_from_slice(&self.sample_count.to_be_bytes());
        let check = compute_check(&out[..BODY_LEN]);
        out[BODY_LEN..].copy_from_slice(&check);
        out
    }

    /// 从字节解码并校验
    ///
    /// # Errors
    /// 长度、魔数、版本、格式码或校验值不符时返回 [`Error::HeaderMismatch`]。
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() != HEADER_LEN {
            return Err(Error::HeaderMismatch(format!(
                "expected {HEADER_LEN} bytes, got {}",
                data.len()
            )));
        }
        if data[0..4] != HEADER_MAGIC {
            return Err(Error::HeaderMismatch("bad magic".to_string()));
        }
        if data[4] != HEADER_VERSION {
            return Err(Error::HeaderMismatch(format!(
                "unsupported version {}",
                data[4]
            )));
        }
        let expected = compute_check(&data[..BODY_LEN]);
        if !constant_time_eq(&data[BODY_LEN..], &expected) {
            return Err(Error::HeaderMismatch("checksum mismatch".to_string()));
        }

        let sample_format = format_from_code(data[5])?;
        let symbol_count = u32::from_be_bytes(read_array(&data[6..10])?);
        let stride = u32::from_be_bytes(read_array(&data[10..14])?);
        let sample_count = u64::from_be_bytes(read_array(&data[14..22])?);

        Ok(Self {
            symbol_count,
            stride,
            sample_count,
            sample_format,
        })
    }
}

const fn format_code(format: SampleFormat) -> u8 {
    match format {
        SampleFormat::UInt8 => 1,
        SampleFormat::Int16 => 2,
        SampleFormat::Int24 => 3,
        SampleFormat::Int32 => 4,
    }
}

fn format_from_code(code: u8) -> Result<SampleFormat> {
    match code {
        1 => Ok(SampleFormat::UInt8),
        2 => Ok(SampleFormat::Int16),
        3 => Ok(SampleFormat::Int24),
        4 => Ok(SampleFormat::Int32),
        other => Err(Error::HeaderMismatch(format!(
            "unknown sample format code {other}"
        ))),
    }
}

fn read_array<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| Error::HeaderMismatch("truncated field".to_string()))
}

fn compute_check(body: &[u8]) -> [u8; CHECK_LEN] {
    let digest = Sha256::digest(body);
    let mut out = [0u8; CHECK_LEN];
    out.copy_from_slice(&digest[..CHECK_LEN]);
    out
}

/// 常量时间比较
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_header() -> MarkHeader {
        MarkHeader::new(2048, 31, 64_000, SampleFormat::Int16).unwrap()
    }

    #[test]
    fn test_encode_decode() {
        let header = sample_header();
        let bytes = header.encode();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(MarkHeader::decode(&bytes).unwrap(), header);
    }

    #[test]
    fn test_layout() {
        let bytes = sample_header().encode();
        assert_eq!(&bytes[0..4], b"PNMK");
        assert_eq!(bytes[4], HEADER_VERSION);
        assert_eq!(bytes[5], 2);
        assert_eq!(&bytes[6..10], &[0x00, 0x00, 0x08, 0x00]); // 2048
        assert_eq!(&bytes[10..14], &[0x00, 0x00, 0x00, 0x1F]); // 31
        assert_eq!(&bytes[14..22], &64_000u64.to_be_bytes());
    }

    #[test]
    fn test_tampered_header() {
        let mut bytes = sample_header().encode();
        bytes[9] ^= 0x01;
        assert!(matches!(
            MarkHeader::decode(&bytes),
            Err(Error::HeaderMismatch(_))
        ));
    }

    #[test]
    fn test_bad_magic_and_length() {
        let mut bytes = sample_header().encode();
        bytes[0] = b'X';
        assert!(MarkHeader::decode(&bytes).is_err());
        assert!(MarkHeader::decode(&bytes[..20]).is_err());
    }
}
