//! 水印提取

use crate::codec::validate_symbols;
use crate::error::{Error, Result};
use crate::sample::{SampleBuffer, SampleFormat};
use crate::watermark::header::MarkHeader;
use crate::watermark::stride::stride_with_capacity;

/// 从裸样本切片按步长读取 `length` 个值
///
/// 未访问到的位置保持 0（不是合法符号）。
///
/// # Errors
/// - `length == 0`: [`Error::DivisionDomain`]
/// - `length` 大于样本数: [`Error::InsufficientCapacity`]
pub fn extract_raw(samples: &[i32], length: usize) -> Result<Vec<i32>> {
    let factor = stride_with_capacity(samples.len(), length)?;
    let mut result = vec![0; length];
    for (slot, &sample) in result.iter_mut().zip(samples.iter().step_by(factor)) {
        *slot = sample;
    }
    Ok(result)
}

/// 提取并把无符号映像还原为有符号值（不校验符号）
///
/// hound/claxon 解码出的样本已在有符号域内；只有调用方经
/// [`SampleBuffer::samples_mut`] 写入无符号映像时还原才会生效。
///
/// # Errors
/// 同 [`extract_raw`]。
pub fn extract(buffer: &SampleBuffer, length: usize) -> Result<Vec<i32>> {
    let format = buffer.sample_format();
    let mut values = extract_raw(buffer.samples(), length)?;
    normalize(&mut values, format);
    Ok(values)
}

/// 提取并要求每个值都是 `±1`
///
/// # Errors
/// 除 [`extract_raw`] 的错误外，非法符号返回 [`Error::SymbolCorruption`]。
pub fn extract_symbols(buffer: &SampleBuffer, length: usize) -> Result<Vec<i32>> {
    let symbols = extract(buffer, length)?;
    validate_symbols(&symbols)?;
    Ok(symbols)
}

/// 按嵌入头提取
///
/// 载体样本数或步长与嵌入头不一致时直接报错，而不是返回错位的数据。
pub fn extract_with_header(buffer: &SampleBuffer, header: &MarkHeader) -> Result<Vec<i32>> {
    let actual = buffer.len() as u64;
    if actual != header.sample_count {
        return Err(Error::CarrierLengthMismatch {
            expected: header.sample_count,
            actual,
        });
    }
    let factor = stride_with_capacity(buffer.len(), header.symbol_len())?;
    if factor != header.stride as usize {
        return Err(Error::HeaderMismatch(format!(
            "stride {factor} does not match recorded stride {}",
            header.stride
        )));
    }
    extract_symbols(buffer, header.symbol_len())
}

fn normalize(values: &mut [i32], format: SampleFormat) {
    for value in values.iter_mut() {
        *value = format.normalize_symbol(*value);
    }
}
