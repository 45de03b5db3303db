//! 水印嵌入
//!
//! 在 `0, f, 2f, ...` 位置直接覆写样本为 `±1`（`f` 为步长）。这是可见标记而非
//! 隐蔽水印：被覆写位置的原始内容不保留。

use crate::codec::validate_symbols;
use crate::error::Result;
use crate::sample::SampleBuffer;
use crate::watermark::header::MarkHeader;
use crate::watermark::stride::stride_with_capacity;

/// 将 PN 序列写入载体
///
/// 返回嵌入的符号数，调用方需保存并在提取时原样传回（或改用
/// [`embed_with_header`] 取得完整的嵌入头）。
///
/// # Errors
/// - PN 为空: [`crate::Error::DivisionDomain`]
/// - PN 长于载体: [`crate::Error::InsufficientCapacity`]
/// - PN 含非 `±1` 符号: [`crate::Error::SymbolCorruption`]
pub fn embed(buffer: &mut SampleBuffer, pn: &[i32]) -> Result<usize> {
    embed_samples(buffer.samples_mut(), pn)
}

/// 在裸样本切片上嵌入
///
/// # Errors
/// 同 [`embed`]。
pub fn embed_samples(samples: &mut [i32], pn: &[i32]) -> Result<usize> {
    let factor = stride_with_capacity(samples.len(), pn.len())?;
    validate_symbols(pn)?;

    // factor * pn.len() <= samples.len()，每个符号都有落点
    for (sample, &symbol) in samples.iter_mut().step_by(factor).zip(pn) {
        *sample = symbol;
    }
    Ok(pn.len())
}

/// 嵌入并返回嵌入头
///
/// # Errors
/// 同 [`embed`]；长度超出头部字段宽度时返回 [`crate::Error::InvalidInput`]。
pub fn embed_with_header(buffer: &mut SampleBuffer, pn: &[i32]) -> Result<MarkHeader> {
    let factor = stride_with_capacity(buffer.len(), pn.len())?;
    let count = embed(buffer, pn)?;
    MarkHeader::new(count, factor, buffer.len(), buffer.sample_format())
}
