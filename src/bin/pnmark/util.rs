use crate::error::{CliError, Result};
use crate::Context;
use glob::glob;
use pnmark::app::{read_header, AppError};
use pnmark::watermark::{extract_symbols, extract_with_header};
use pnmark::{MarkHeader, SampleBuffer};
use std::path::{Path, PathBuf};

pub fn expand_inputs(values: &[String]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for value in values {
        if is_glob_pattern(value) {
            let mut matched = false;
            let entries = glob(value).map_err(|e| CliError::InvalidGlob(e.to_string()))?;
            for entry in entries {
                let path = entry.map_err(|e| CliError::Glob(e.to_string()))?;
                matched = true;
                out.push(path);
            }
            if !matched {
                return Err(CliError::InputNotFound(value.clone()));
            }
        } else {
            out.push(PathBuf::from(value));
        }
    }

    if out.is_empty() {
        return Err(CliError::Message("no input files provided".to_string()));
    }

    Ok(out)
}

pub fn ensure_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::InputNotFound(path.display().to_string()))
    }
}

pub fn load_buffer(path: &Path) -> Result<SampleBuffer> {
    ensure_file(path)?;
    Ok(SampleBuffer::from_file(path)?)
}

/// `--message` 或 `--message-file`
pub fn read_message(text: Option<&String>, file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match (text, file) {
        (Some(text), None) => Ok(text.as_bytes().to_vec()),
        (None, Some(path)) => {
            ensure_file(path)?;
            Ok(std::fs::read(path)?)
        }
        _ => Err(CliError::Message(
            "provide exactly one of --message or --message-file".to_string(),
        )),
    }
}

/// 提取到的符号及其来源
pub struct Extraction {
    /// Internal field.
    pub symbols: Vec<i32>,
    /// Internal field.
    pub header: Option<MarkHeader>,
}

/// `--length` 优先，否则读取旁路嵌入头
pub fn extract_from(ctx: &Context, input: &Path, length: Option<usize>) -> Result<Extraction> {
    let buffer = load_buffer(input)?;
    if let Some(length) = length {
        ctx.out
            .info_diag(format!("{}: explicit length {length}", input.display()));
        let symbols = extract_symbols(&buffer, length)?;
        return Ok(Extraction {
            symbols,
            header: None,
        });
    }

    match read_header(input) {
        Ok(Some(header)) => {
            ctx.out.info_diag(format!(
                "{}: header symbols={} stride={} samples={}",
                input.display(),
                header.symbol_count,
                header.stride,
                header.sample_count
            ));
            let symbols = extract_with_header(&buffer, &header)?;
            Ok(Extraction {
                symbols,
                header: Some(header),
            })
        }
        Ok(None) => Err(CliError::LengthRequired(input.display().to_string())),
        Err(AppError::Pnmark(err)) => Err(CliError::Pnmark(err)),
        Err(err) => Err(CliError::App(err)),
    }
}

fn is_glob_pattern(value: &str) -> bool {
    value.contains('*') || value.contains('?') || value.contains('[')
}
