//! 样本域水印嵌入/提取

pub mod embed;
pub mod extract;
pub mod header;
pub mod stride;

pub use embed::{embed, embed_samples, embed_with_header};
pub use extract::{extract, extract_raw, extract_symbols, extract_with_header};
pub use header::{MarkHeader, HEADER_LEN};
pub use stride::stride;
