use crate::app::error::{AppError, Result};
use crate::binder::DEFAULT_KEY_BITS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 最小 RSA 密钥长度
pub const MIN_KEY_BITS: usize = 1024;
/// 最大 RSA 密钥长度
pub const MAX_KEY_BITS: usize = 8192;

const DEFAULT_OUTPUT_SUFFIX: &str = "_marked";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 密钥目录（默认 `~/.pnmark/keys`）
    pub key_dir: Option<PathBuf>,
    /// 新生成密钥的长度
    pub key_bits: usize,
    /// 默认输出文件名后缀
    pub output_suffix: String,
    /// 是否写入嵌入头旁路文件
    pub write_header: bool,
    /// ffmpeg 路径
    pub ffmpeg: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_dir: None,
            key_bits: DEFAULT_KEY_BITS,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            write_header: true,
            ffmpeg: None,
        }
    }
}

impl Settings {
    /// 从指定路径加载；文件不存在或为空时返回默认值
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = toml::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    /// 当目录创建或文件写入失败时返回错误。
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// 检查数值范围
    pub fn validate(&self) -> Result<()> {
        validate_key_bits(self.key_bits)?;
        if self.output_suffix.is_empty() {
            return Err(AppError::Message(
                "output_suffix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// 实际使用的密钥目录
    pub fn key_dir(&self) -> Result<PathBuf> {
        match &self.key_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(base_dir()?.join("keys")),
        }
    }
}

pub fn validate_key_bits(bits: usize) -> Result<()> {
    if (MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) && bits % 8 == 0 {
        Ok(())
    } else {
        Err(AppError::Message(format!(
            "key_bits must be a multiple of 8 in {MIN_KEY_BITS}..={MAX_KEY_BITS}, got {bits}"
        )))
    }
}

/// `~/.pnmark`
pub fn base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AppError::Message("home directory not found".to_string()))?;
    Ok(home.join(".pnmark"))
}

/// `~/.pnmark/config.toml`
pub fn config_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("config.toml"))
}

/// `<dir>/<stem><suffix>.wav`
pub fn default_output_path(input: &Path, suffix: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| AppError::Message("invalid input file name".to_string()))?;

    let mut name = std::ffi::OsString::from(stem);
    name.push(suffix);
    name.push(".wav");

    let output = input.with_file_name(name);
    if output == input {
        return Err(AppError::Message(
            "output path would overwrite input".to_string(),
        ));
    }
    Ok(output)
}
