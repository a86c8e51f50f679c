use std::collections::BTreeMap;
use std::fmt::{self, Display};

use tracing::{debug, warn};

use crate::error::DataError;
use crate::prelude::*;

pub use databuilder::DataBuilder;
pub use value::{Value, ValueType};

mod codec;
mod databuilder;
mod value;

/// 在后台任务之间传递参数的不可变键值容器
///
/// 键唯一，值只能是 `Value` 中的基本类型或数组。通过 `DataBuilder` 构建，
/// 可以无损地序列化为字节流并还原。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Data {
    // 按键排序，保证编码结果稳定
    values: BTreeMap<String, Value>,
}

impl Data {
    /// 不包含任何条目的 `Data`
    pub const EMPTY: Self = Self {
        values: BTreeMap::new(),
    };

    pub fn empty() -> Self {
        Self::EMPTY
    }

    pub fn builder() -> DataBuilder {
        DataBuilder::new()
    }

    pub(crate) fn from_values(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }

    /// 条目数量
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// 按键的顺序遍历所有条目
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// 键存在且值的类型与 `value_type` 相同
    pub fn has_key_with_value_of_type(&self, key: &str, value_type: ValueType) -> bool {
        self.get(key)
            .is_some_and(|value| value.value_type() == value_type)
    }

    // 标量读取：键不存在或者类型不匹配时返回默认值

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(value)) => *value,
            _ => default,
        }
    }

    pub fn get_byte(&self, key: &str, default: i8) -> i8 {
        match self.get(key) {
            Some(Value::Byte(value)) => *value,
            _ => default,
        }
    }

    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.get(key) {
            Some(Value::Int(value)) => *value,
            _ => default,
        }
    }

    pub fn get_long(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(Value::Long(value)) => *value,
            _ => default,
        }
    }

    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.get(key) {
            Some(Value::Float(value)) => *value,
            _ => default,
        }
    }

    pub fn get_double(&self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            Some(Value::Double(value)) => *value,
            _ => default,
        }
    }

    /// 键不存在、值为空或者不是字符串时返回 `None`
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Value::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    // 数组读取：键不存在或者类型不匹配时返回 `None`

    pub fn get_bool_array(&self, key: &str) -> Option<&[bool]> {
        match self.get(key) {
            Some(Value::BoolArray(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn get_byte_array(&self, key: &str) -> Option<&[i8]> {
        match self.get(key) {
            Some(Value::ByteArray(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn get_int_array(&self, key: &str) -> Option<&[i32]> {
        match self.get(key) {
            Some(Value::IntArray(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn get_long_array(&self, key: &str) -> Option<&[i64]> {
        match self.get(key) {
            Some(Value::LongArray(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn get_float_array(&self, key: &str) -> Option<&[f32]> {
        match self.get(key) {
            Some(Value::FloatArray(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn get_double_array(&self, key: &str) -> Option<&[f64]> {
        match self.get(key) {
            Some(Value::DoubleArray(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn get_string_array(&self, key: &str) -> Option<&[Option<String>]> {
        match self.get(key) {
            Some(Value::StringArray(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// 序列化为字节流
    ///
    /// # 错误
    /// 编码结果超过 `MAX_DATA_BYTES` 时返回 `DataError::TooLarge`，保证输出总能被 `from_bytes` 读回。
    pub fn to_bytes(&self) -> Result<Vec<u8>, DataError> {
        let bytes = codec::encode(&self.values)?;
        if bytes.len() > MAX_DATA_BYTES {
            warn!(size = bytes.len(), limit = MAX_DATA_BYTES, "refusing to encode oversized data");
            return Err(DataError::TooLarge {
                size: bytes.len(),
                limit: MAX_DATA_BYTES,
            });
        }
        debug!(entries = self.size(), bytes = bytes.len(), "encoded data");
        Ok(bytes)
    }

    /// 从字节流还原
    ///
    /// # 错误
    /// 超过 `MAX_DATA_BYTES`、格式错误或数据被截断时返回 `DataError`，不会返回部分数据。
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DataError> {
        if bytes.len() > MAX_DATA_BYTES {
            return Err(DataError::TooLarge {
                size: bytes.len(),
                limit: MAX_DATA_BYTES,
            });
        }
        let values = codec::decode(bytes)?;
        debug!(entries = values.len(), bytes = bytes.len(), "decoded data");
        Ok(Self { values })
    }
}

impl Display for Data {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Data {{")?;
        for (idx, (key, value)) in self.values.iter().enumerate() {
            if idx > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key} : {value}")?;
        }
        write!(formatter, "}}")
    }
}
