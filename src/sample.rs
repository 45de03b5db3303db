//! PCM 样本缓冲区
//!
//! 载体音频统一存储为交错排列的 `i32` 样本，并显式携带位深与有/无符号属性，
//! 取代“读回 255 当作 -1”这类隐式约定。

use std::path::Path;

use crate::error::{Error, Result};

/// 样本格式（容器中的位深与符号性）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// 8-bit 无符号（内存中按有符号 -128..=127 存储，容器层负责偏移）
    UInt8,
    /// 16-bit 有符号
    Int16,
    /// 24-bit 有符号
    Int24,
    /// 32-bit 有符号
    Int32,
}

impl SampleFormat {
    /// 每样本的位数
    #[must_use]
    pub const fn bits_per_sample(&self) -> u16 {
        match self {
            Self::UInt8 => 8,
            Self::Int16 => 16,
            Self::Int24 => 24,
            Self::Int32 => 32,
        }
    }

    /// 容器中的样本是否为有符号表示
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        !matches!(self, Self::UInt8)
    }

    /// 内存表示的最小值
    #[must_use]
    pub const fn min_value(&self) -> i32 {
        match self {
            Self::Int32 => i32::MIN,
            _ => -(1 << (self.bits_per_sample() - 1)),
        }
    }

    /// 内存表示的最大值
    #[must_use]
    pub const fn max_value(&self) -> i32 {
        match self {
            Self::Int32 => i32::MAX,
            _ => (1 << (self.bits_per_sample() - 1)) - 1,
        }
    }

    /// 从位深推断格式
    ///
    /// # Errors
    /// 不支持的位深返回 [`Error::InvalidInput`]。
    pub fn from_bits(bits: u16) -> Result<Self> {
        match bits {
            8 => Ok(Self::UInt8),
            16 => Ok(Self::Int16),
            24 => Ok(Self::Int24),
            32 => Ok(Self::Int32),
            other => Err(Error::InvalidInput(format!(
                "unsupported bit depth: {other}"
            ))),
        }
    }

    /// 把按本格式位宽读回的原始值还原到有符号域
    ///
    /// 嵌入时写入的是有符号 `-1`；若解码路径按无符号位宽读回，会得到其补码映像
    /// （8-bit 为 `255`，16-bit 为 `65535`）。落在 `(max_value, 2^bits)` 的值减去
    /// `2^bits`，其余原样返回。32-bit 在 `i32` 中不存在无符号映像。
    #[must_use]
    pub fn normalize_symbol(&self, raw: i32) -> i32 {
        let bits = u32::from(self.bits_per_sample());
        if bits >= 32 {
            return raw;
        }
        let modulus = 1i64 << bits;
        let value = i64::from(raw);
        if value > i64::from(self.max_value()) && value < modulus {
            // 结果位于 [-2^(bits-1), 0)，必然可放入 i32
            i32::try_from(value - modulus).unwrap_or(raw)
        } else {
            raw
        }
    }
}

/// 交错 PCM 样本 + 格式元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    /// 交错样本 `[L0, R0, L1, R1, ...]`
    samples: Vec<i32>,
    /// 采样率
    sample_rate: u32,
    /// 声道数
    channels: u16,
    /// 样本格式
    sample_format: SampleFormat,
    /// 源文件位深
    source_bits: u16,
}

impl SampleBuffer {
    /// 创建样本缓冲区
    ///
    /// # Errors
    /// 声道数为 0、样本数不是声道数的整数倍，或样本超出位深范围时返回错误。
    pub fn new(
        samples: Vec<i32>,
        sample_rate: u32,
        channels: u16,
        sample_format: SampleFormat,
    ) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidInput("no channels".into()));
        }
        if samples.len() % usize::from(channels) != 0 {
            return Err(Error::InvalidInput(format!(
                "sample count {} is not a multiple of channel count {channels}",
                samples.len()
            )));
        }
        let (min, max) = (sample_format.min_value(), sample_format.max_value());
        if let Some(index) = samples.iter().position(|s| !(min..=max).contains(s)) {
            return Err(Error::InvalidInput(format!(
                "sample {} at index {index} exceeds {}-bit range",
                samples[index],
                sample_format.bits_per_sample()
            )));
        }

        Ok(Self {
            samples,
            sample_rate,
            channels,
            sample_format,
            source_bits: sample_format.bits_per_sample(),
        })
    }

    /// 记录源文件位深（与存储格式不同时使用）
    #[must_use]
    pub const fn with_source_bits(mut self, bits: u16) -> Self {
        self.source_bits = bits;
        self
    }

    /// 交错样本
    #[must_use]
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// 可变交错样本（嵌入器独占写入）
    pub fn samples_mut(&mut self) -> &mut [i32] {
        &mut self.samples
    }

    /// 取出样本
    #[must_use]
    pub fn into_samples(self) -> Vec<i32> {
        self.samples
    }

    /// 样本总数（所有声道）
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 每声道帧数
    #[must_use]
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels)
    }

    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub const fn channels(&self) -> u16 {
        self.channels
    }

    #[must_use]
    pub const fn sample_format(&self) -> SampleFormat {
        self.sample_format
    }

    #[must_use]
    pub const fn source_bits(&self) -> u16 {
        self.source_bits
    }

    /// 从 WAV 文件加载
    ///
    /// # Errors
    /// 文件无法打开、非整数 PCM 或位深不受支持时返回 [`Error::InvalidInput`]。
    #[cfg(feature = "wav")]
    pub fn from_wav<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = hound::WavReader::open(path.as_ref())
            .map_err(|e| Error::InvalidInput(format!("failed to open WAV: {e}")))?;
        Self::read_wav(reader)
    }

    /// 从内存中的 WAV 数据加载
    #[cfg(feature = "wav")]
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self> {
        let reader = hound::WavReader::new(std::io::Cursor::new(bytes))
            .map_err(|e| Error::InvalidInput(format!("failed to parse WAV: {e}")))?;
        Self::read_wav(reader)
    }

    #[cfg(feature = "wav")]
    fn read_wav<R: std::io::Read>(reader: hound::WavReader<R>) -> Result<Self> {
        let spec = reader.spec();
        if spec.sample_format != hound::SampleFormat::Int {
            return Err(Error::InvalidInput(format!(
                "unsupported sample format: {:?} {}bit",
                spec.sample_format, spec.bits_per_sample
            )));
        }
        let sample_format = SampleFormat::from_bits(spec.bits_per_sample)?;

        let samples = reader
            .into_samples::<i32>()
            .map(|s| s.map_err(|e| Error::InvalidInput(format!("read error: {e}"))))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(samples, spec.sample_rate, spec.channels, sample_format)?
            .with_source_bits(spec.bits_per_sample))
    }

    /// 保存为 WAV 文件
    ///
    /// # Errors
    /// 文件创建或写入失败时返回 [`Error::InvalidInput`]。
    #[cfg(feature = "wav")]
    pub fn to_wav<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = hound::WavWriter::create(path.as_ref(), self.wav_spec())
            .map_err(|e| Error::InvalidInput(format!("failed to create WAV: {e}")))?;
        self.write_wav(writer)
    }

    /// 编码为内存中的 WAV 数据
    #[cfg(feature = "wav")]
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let writer = hound::WavWriter::new(&mut cursor, self.wav_spec())
                .map_err(|e| Error::InvalidInput(format!("failed to create WAV: {e}")))?;
            self.write_wav(writer)?;
        }
        Ok(cursor.into_inner())
    }

    #[cfg(feature = "wav")]
    fn wav_spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.sample_format.bits_per_sample(),
            sample_format: hound::SampleFormat::Int,
        }
    }

    #[cfg(feature = "wav")]
    fn write_wav<W: std::io::Write + std::io::Seek>(
        &self,
        mut writer: hound::WavWriter<W>,
    ) -> Result<()> {
        let write_err = |e: hound::Error| Error::InvalidInput(format!("write error: {e}"));
        let range_err = |s: i32| Error::InvalidInput(format!("sample {s} out of range"));

        for &sample in &self.samples {
            match self.sample_format {
                SampleFormat::UInt8 => {
                    let value = i8::try_from(sample).map_err(|_| range_err(sample))?;
                    writer.write_sample(value).map_err(write_err)?;
                }
                SampleFormat::Int16 => {
                    let value = i16::try_from(sample).map_err(|_| range_err(sample))?;
                    writer.write_sample(value).map_err(write_err)?;
                }
                SampleFormat::Int24 | SampleFormat::Int32 => {
                    writer.write_sample(sample).map_err(write_err)?;
                }
            }
        }

        writer
            .finalize()
            .map_err(|e| Error::InvalidInput(format!("finalize error: {e}")))
    }

    /// 从 FLAC 文件加载
    ///
    /// # Errors
    /// 文件无法打开、解码失败或位深不受支持时返回 [`Error::InvalidInput`]。
    #[cfg(feature = "flac")]
    pub fn from_flac<P: AsRef<Path>>(path: P) -> Result<Self> {
        use claxon::FlacReader;

        let mut reader = FlacReader::open(path.as_ref())
            .map_err(|e| Error::InvalidInput(format!("failed to open FLAC: {e}")))?;

        let info = reader.streaminfo();
        let channels = u16::try_from(info.channels)
            .map_err(|_| Error::InvalidInput(format!("bad channel count {}", info.channels)))?;
        let bits = u16::try_from(info.bits_per_sample).map_err(|_| {
            Error::InvalidInput(format!("bad FLAC bit depth {}", info.bits_per_sample))
        })?;
        let sample_format = SampleFormat::from_bits(bits)?;

        let mut samples = Vec::new();
        let mut block_reader = reader.blocks();
        let mut buffer = Vec::new();

        // claxon 按块返回分声道数据，这里重新交错
        while let Some(block) = block_reader
            .read_next_or_eof(buffer)
            .map_err(|e| Error::InvalidInput(format!("FLAC decode error: {e}")))?
        {
            for frame in 0..block.duration() {
                for ch in 0..info.channels {
                    samples.push(block.sample(ch, frame));
                }
            }
            buffer = block.into_buffer();
        }

        Ok(Self::new(samples, info.sample_rate, channels, sample_format)?.with_source_bits(bits))
    }

    /// 从文件加载 (按扩展名选择容器)
    ///
    /// # Errors
    /// 扩展名不受支持或对应容器读取失败时返回 [`Error::InvalidInput`]。
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            #[cfg(feature = "wav")]
            Some("wav") => Self::from_wav(path),
            #[cfg(feature = "flac")]
            Some("flac") => Self::from_flac(path),
            _ => Err(Error::InvalidInput(format!(
                "unsupported file format: {}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ranges() {
        assert_eq!(SampleFormat::UInt8.min_value(), -128);
        assert_eq!(SampleFormat::UInt8.max_value(), 127);
        assert_eq!(SampleFormat::Int16.max_value(), 32_767);
        assert_eq!(SampleFormat::Int24.min_value(), -8_388_608);
        assert_eq!(SampleFormat::Int32.max_value(), i32::MAX);
        assert!(!SampleFormat::UInt8.is_signed());
        assert!(SampleFormat::Int24.is_signed());
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(SampleFormat::UInt8.normalize_symbol(255), -1);
        assert_eq!(SampleFormat::UInt8.normalize_symbol(1), 1);
        assert_eq!(SampleFormat::UInt8.normalize_symbol(-1), -1);
        // 16-bit 下 255 是合法样本，不应被改写
        assert_eq!(SampleFormat::Int16.normalize_symbol(255), 255);
        assert_eq!(SampleFormat::Int16.normalize_symbol(65_535), -1);
        assert_eq!(SampleFormat::Int32.normalize_symbol(-1), -1);
    }

    #[test]
    fn test_new_validates() {
        assert!(SampleBuffer::new(vec![1, 2, 3], 8000, 2, SampleFormat::Int16).is_err());
        assert!(SampleBuffer::new(vec![1, 2], 8000, 0, SampleFormat::Int16).is_err());
        assert!(SampleBuffer::new(vec![40_000], 8000, 1, SampleFormat::Int16).is_err());
        assert!(SampleBuffer::new(vec![128], 8000, 1, SampleFormat::UInt8).is_err());

        let buffer = SampleBuffer::new(vec![1, -1, 2, -2], 8000, 2, SampleFormat::Int16).unwrap();
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.frames(), 2);
        assert_eq!(buffer.source_bits(), 16);
    }

    #[test]
    fn test_wav_bytes_round_trip() {
        for format in [
            SampleFormat::UInt8,
            SampleFormat::Int16,
            SampleFormat::Int24,
            SampleFormat::Int32,
        ] {
            let samples = vec![
                0,
                1,
                -1,
                format.max_value(),
                format.min_value(),
                format.max_value() / 3,
            ];
            let buffer = SampleBuffer::new(samples, 44_100, 2, format).unwrap();
            let bytes = buffer.to_wav_bytes().unwrap();
            let loaded = SampleBuffer::from_wav_bytes(&bytes).unwrap();
            assert_eq!(loaded, buffer, "format {format:?}");
        }
    }

    #[cfg(feature = "flac")]
    const FLAC_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/stereo16.flac");

    #[cfg(feature = "flac")]
    #[test]
    fn test_flac_interleaved() {
        let buffer = SampleBuffer::from_flac(FLAC_FIXTURE).unwrap();
        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.sample_rate(), 44_100);
        assert_eq!(buffer.sample_format(), SampleFormat::Int16);
        assert_eq!(buffer.source_bits(), 16);
        assert_eq!(buffer.frames(), 32);

        // [L0, R0, L1, R1, ...]
        assert_eq!(
            &buffer.samples()[..10],
            &[-1000, 0, -900, -50, -800, -100, -1, 1, 32_767, -32_768]
        );
        assert_eq!(buffer.samples()[62], 2100);
        assert_eq!(buffer.samples()[63], -1550);
    }

    #[cfg(feature = "flac")]
    #[test]
    fn test_from_file_dispatches_flac() {
        let by_ext = SampleBuffer::from_file(FLAC_FIXTURE).unwrap();
        assert_eq!(by_ext, SampleBuffer::from_flac(FLAC_FIXTURE).unwrap());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SampleBuffer::from_file("audio.mp3");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
