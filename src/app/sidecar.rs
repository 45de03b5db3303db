//! 嵌入头旁路文件 `<carrier>.pnmk`

use crate::app::error::{AppError, Result};
use crate::watermark::MarkHeader;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const SIDECAR_EXT: &str = "pnmk";

/// `song.wav` → `song.wav.pnmk`
pub fn sidecar_path(carrier: &Path) -> PathBuf {
    let mut name = OsString::from(carrier.as_os_str());
    name.push(".");
    name.push(SIDECAR_EXT);
    PathBuf::from(name)
}

pub fn write_header(carrier: &Path, header: &MarkHeader) -> Result<PathBuf> {
    let path = sidecar_path(carrier);
    fs::write(&path, header.encode())?;
    Ok(path)
}

/// 删除旁路文件；返回是否存在过
///
/// 不写嵌入头重新嵌入时必须调用，否则旧头会描述错误的载体。
pub fn remove_header(carrier: &Path) -> Result<bool> {
    let path = sidecar_path(carrier);
    if !path.is_file() {
        return Ok(false);
    }
    fs::remove_file(&path)?;
    Ok(true)
}

/// 读取旁路文件；不存在时返回 `None`
pub fn read_header(carrier: &Path) -> Result<Option<MarkHeader>> {
    let path = sidecar_path(carrier);
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(&path)?;
    MarkHeader::decode(&bytes)
        .map(Some)
        .map_err(AppError::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::sample::SampleFormat;

    #[test]
    fn sidecar_naming() {
        assert_eq!(
            sidecar_path(Path::new("/a/b/song.wav")),
            PathBuf::from("/a/b/song.wav.pnmk")
        );
    }

    #[test]
    fn write_read() {
        let carrier = std::env::temp_dir().join("pnmark_sidecar_test.wav");
        let header = MarkHeader::new(1024, 7, 8000, SampleFormat::Int24).unwrap();
        let path = write_header(&carrier, &header).unwrap();
        assert_eq!(read_header(&carrier).unwrap(), Some(header));

        fs::write(&path, b"garbage").unwrap();
        assert!(read_header(&carrier).is_err());
        let _ = fs::remove_file(&path);
        assert_eq!(read_header(&carrier).unwrap(), None);
    }

    #[test]
    fn remove_stale_header() {
        let carrier = std::env::temp_dir().join("pnmark_sidecar_remove.wav");
        let header = MarkHeader::new(8, 1, 8, SampleFormat::Int16).unwrap();
        let path = write_header(&carrier, &header).unwrap();
        assert!(path.is_file());

        assert!(remove_header(&carrier).unwrap());
        assert!(!path.exists());
        assert_eq!(read_header(&carrier).unwrap(), None);
        assert!(!remove_header(&carrier).unwrap());
    }
}
