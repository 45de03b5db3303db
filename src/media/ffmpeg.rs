//! 调用 ffmpeg 把任意输入转为可嵌入的 PCM WAV
//!
//! 默认输出 8 kHz 单声道 16-bit。

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

const DEFAULT_FFMPEG: &str = "ffmpeg";

/// 转换参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// 输出声道数
    pub channels: u16,
    /// 输出采样率
    pub sample_rate: u32,
    /// ffmpeg 路径（默认从 PATH 查找）
    pub binary: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 8000,
            binary: None,
        }
    }
}

impl ConvertOptions {
    fn binary(&self) -> &Path {
        self.binary
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_FFMPEG))
    }
}

/// 构造 ffmpeg 参数
#[must_use]
pub fn ffmpeg_args(input: &Path, output: &Path, options: &ConvertOptions) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-i".into(),
        input.as_os_str().to_owned(),
        "-ac".into(),
        options.channels.to_string().into(),
        "-ar".into(),
        options.sample_rate.to_string().into(),
        "-acodec".into(),
        "pcm_s16le".into(),
        output.as_os_str().to_owned(),
    ]
}

/// 执行转换
///
/// # Errors
/// 找不到 ffmpeg 返回 [`Error::ConverterNotFound`]；
/// ffmpeg 非零退出返回 [`Error::ConverterExec`]（附 stderr）。
pub fn convert_with_ffmpeg(input: &Path, output: &Path, options: &ConvertOptions) -> Result<()> {
    if !input.is_file() {
        return Err(Error::InvalidInput(format!(
            "input not found: {}",
            input.display()
        )));
    }
    if input == output {
        return Err(Error::InvalidInput(
            "output path would overwrite input".to_string(),
        ));
    }

    let result = Command::new(options.binary())
        .args(ffmpeg_args(input, output, options))
        .output();
    let output = match result {
        Ok(output) => output,
        Err(err) if err.kind() == ErrorKind::NotFound => return Err(Error::ConverterNotFound),
        Err(err) => return Err(Error::ConverterExec(err.to_string())),
    };
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::ConverterExec(stderr.trim().to_string()));
    }
    Ok(())
}

/// 检查 ffmpeg 是否可执行
#[must_use]
pub fn ffmpeg_available(binary: Option<&Path>) -> bool {
    Command::new(binary.unwrap_or_else(|| Path::new(DEFAULT_FFMPEG)))
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
