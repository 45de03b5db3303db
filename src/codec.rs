//! 签名 ↔ PN 序列编解码
//!
//! 每个字节展开为 8 个双极性符号，低位 (bit 0) 在前：
//!
//! ```text
//! byte 0x05 = 0b0000_0101
//!   → [+1, -1, +1, -1, -1, -1, -1, -1]
//! ```

use crate::error::{Error, Result};

/// 置位比特对应的符号
pub const SYMBOL_ONE: i32 = 1;

/// 清零比特对应的符号
pub const SYMBOL_ZERO: i32 = -1;

/// 每字节的符号数
pub const SYMBOLS_PER_BYTE: usize = 8;

/// 签名字节 → PN 序列
///
/// 输出长度恒为 `8 × signature.len()`，无失败路径。
#[must_use]
pub fn signature_to_pn(signature: &[u8]) -> Vec<i32> {
    let mut pn = Vec::with_capacity(signature.len() * SYMBOLS_PER_BYTE);
    for &byte in signature {
        for bit in 0..SYMBOLS_PER_BYTE {
            if byte & (1 << bit) != 0 {
                pn.push(SYMBOL_ONE);
            } else {
                pn.push(SYMBOL_ZERO);
            }
        }
    }
    pn
}

/// PN 序列 → 签名字节
///
/// # Errors
/// - 长度不是 8 的倍数时返回 [`Error::CodecLength`]（不做截断）
/// - 任一符号不是 `+1`/`-1` 时返回 [`Error::SymbolCorruption`]
pub fn pn_to_signature(pn: &[i32]) -> Result<Vec<u8>> {
    if pn.len() % SYMBOLS_PER_BYTE != 0 {
        return Err(Error::CodecLength(pn.len()));
    }
    validate_symbols(pn)?;

    Ok(pn
        .chunks_exact(SYMBOLS_PER_BYTE)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .filter(|(_, &symbol)| symbol == SYMBOL_ONE)
                .fold(0u8, |acc, (bit, _)| acc | (1 << bit))
        })
        .collect())
}

/// 检查每个符号都严格为 `+1` 或 `-1`
///
/// # Errors
/// 返回第一个非法符号的位置与取值。
pub fn validate_symbols(pn: &[i32]) -> Result<()> {
    match pn
        .iter()
        .position(|&symbol| symbol != SYMBOL_ONE && symbol != SYMBOL_ZERO)
    {
        Some(index) => Err(Error::SymbolCorruption {
            index,
            value: pn[index],
        }),
        None => Ok(()),
    }
}
