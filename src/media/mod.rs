//! 外部格式转换

mod ffmpeg;

pub use ffmpeg::{convert_with_ffmpeg, ffmpeg_args, ffmpeg_available, ConvertOptions};
