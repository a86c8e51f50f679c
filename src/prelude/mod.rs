pub type ByteIdx = usize;
pub type GraphemeIdx = usize;

/// `Data` 序列化后允许的最大字节数
pub const MAX_DATA_BYTES: usize = 10 * 1024;

/// `CarText::to_short_string` 保留的最大字素数量
pub const MAX_SHORT_STRING_LENGTH: GraphemeIdx = 16;

// 字节流头部
pub const STREAM_MAGIC: u16 = 0xABEF;
pub const STREAM_VERSION: u16 = 1;
