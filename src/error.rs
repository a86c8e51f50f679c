use thiserror::Error;

use crate::cartext::SpanKind;
use crate::prelude::*;

/// 给 `SpannedText` 设置标注时的范围错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    #[error("span range {start}..{end} is inverted")]
    Inverted { start: ByteIdx, end: ByteIdx },

    #[error("span range {start}..{end} exceeds text length {len}")]
    OutOfBounds {
        start: ByteIdx,
        end: ByteIdx,
        len: usize,
    },

    #[error("span index {index} is not on a char boundary")]
    NotCharBoundary { index: ByteIdx },
}

/// `CarText` 不满足某个 API 的标注约束
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarTextError {
    #[error("span {kind:?} at {start}..{end} is not allowed by these constraints")]
    SpanNotAllowed {
        kind: SpanKind,
        start: ByteIdx,
        end: ByteIdx,
    },
}

/// `Data` 构建与字节流编解码错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("data is {size} bytes, exceeding the limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("bad stream magic {found:#06x}")]
    BadMagic { found: u16 },

    #[error("unsupported stream version {found}")]
    UnsupportedVersion { found: u16 },

    #[error("stream truncated: needed {needed} more bytes")]
    Truncated { needed: usize },

    #[error("unknown value tag {tag:#04x}")]
    UnknownTag { tag: u8 },

    #[error("invalid bool byte {byte:#04x}")]
    InvalidBool { byte: u8 },

    #[error("invalid utf-8 in {context}")]
    InvalidUtf8 { context: &'static str },

    #[error("duplicate key {key:?}")]
    DuplicateKey { key: String },

    #[error("{remaining} trailing bytes after the last entry")]
    TrailingBytes { remaining: usize },

    #[error("length {len} does not fit in the stream format")]
    LengthOverflow { len: usize },
}
