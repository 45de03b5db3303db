//! 步长计算
//!
//! 嵌入与提取都用同一公式 `floor(buffer_len / pn_len)` 从两个长度重新计算步长，
//! 步长本身不写入载体。

use crate::error::{Error, Result};

/// 计算符号间隔
///
/// `pn_len > buffer_len` 时结果为 0，由调用方判定容量不足。
///
/// # Errors
/// `pn_len == 0` 时返回 [`Error::DivisionDomain`]。
pub fn stride(buffer_len: usize, pn_len: usize) -> Result<usize> {
    if pn_len == 0 {
        return Err(Error::DivisionDomain);
    }
    Ok(buffer_len / pn_len)
}

/// 计算步长并要求至少为 1
pub(crate) fn stride_with_capacity(buffer_len: usize, pn_len: usize) -> Result<usize> {
    match stride(buffer_len, pn_len)? {
        0 => Err(Error::InsufficientCapacity {
            needed: pn_len,
            available: buffer_len,
        }),
        factor => Ok(factor),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_values() {
        assert_eq!(stride(64_000, 2048).unwrap(), 31);
        assert_eq!(stride(100, 10).unwrap(), 10);
        assert_eq!(stride(109, 10).unwrap(), 10);
        assert_eq!(stride(10, 10).unwrap(), 1);
        assert_eq!(stride(0, 10).unwrap(), 0);
    }

    #[test]
    fn test_stride_deterministic() {
        for (len, n) in [(64_000, 2048), (8000, 1024), (3, 7), (1, 1)] {
            assert_eq!(stride(len, n).unwrap(), stride(len, n).unwrap());
        }
    }

    #[test]
    fn test_stride_zero_when_pn_longer() {
        assert_eq!(stride(100, 101).unwrap(), 0);
        assert_eq!(stride(2047, 2048).unwrap(), 0);
        assert!(matches!(
            stride_with_capacity(2047, 2048),
            Err(Error::InsufficientCapacity {
                needed: 2048,
                available: 2047
            })
        ));
    }

    #[test]
    fn test_zero_pn_len() {
        assert!(matches!(stride(64_000, 0), Err(Error::DivisionDomain)));
        assert!(matches!(stride(0, 0), Err(Error::DivisionDomain)));
    }
}
