use std::collections::BTreeMap;

use tracing::warn;

use crate::error::DataError;
use crate::prelude::*;
use super::{codec, Data, Value};

/// `Data` 的构建器
///
/// 同一个键多次写入时以最后一次为准。`build` 时检查序列化后的大小。
#[derive(Clone, Debug)]
pub struct DataBuilder {
    values: BTreeMap<String, Value>,
    max_bytes: usize,
}

impl Default for DataBuilder {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
            max_bytes: MAX_DATA_BYTES,
        }
    }
}

impl DataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 降低序列化大小上限
    ///
    /// 上限不能超过 `MAX_DATA_BYTES`，否则构建出的 `Data` 无法通过 `from_bytes` 还原。
    pub fn max_bytes(mut self, limit: usize) -> Self {
        self.max_bytes = limit.min(MAX_DATA_BYTES);
        self
    }

    /// 写入任意支持的值
    pub fn put(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn put_null(self, key: impl Into<String>) -> Self {
        self.put(key, Value::Null)
    }

    pub fn put_bool(self, key: impl Into<String>, value: bool) -> Self {
        self.put(key, value)
    }

    pub fn put_byte(self, key: impl Into<String>, value: i8) -> Self {
        self.put(key, value)
    }

    pub fn put_int(self, key: impl Into<String>, value: i32) -> Self {
        self.put(key, value)
    }

    pub fn put_long(self, key: impl Into<String>, value: i64) -> Self {
        self.put(key, value)
    }

    pub fn put_float(self, key: impl Into<String>, value: f32) -> Self {
        self.put(key, value)
    }

    pub fn put_double(self, key: impl Into<String>, value: f64) -> Self {
        self.put(key, value)
    }

    /// `None` 保存为空值
    pub fn put_string(self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.put(key, value)
    }

    pub fn put_bool_array(self, key: impl Into<String>, value: &[bool]) -> Self {
        self.put(key, value.to_vec())
    }

    pub fn put_byte_array(self, key: impl Into<String>, value: &[i8]) -> Self {
        self.put(key, value.to_vec())
    }

    pub fn put_int_array(self, key: impl Into<String>, value: &[i32]) -> Self {
        self.put(key, value.to_vec())
    }

    pub fn put_long_array(self, key: impl Into<String>, value: &[i64]) -> Self {
        self.put(key, value.to_vec())
    }

    pub fn put_float_array(self, key: impl Into<String>, value: &[f32]) -> Self {
        self.put(key, value.to_vec())
    }

    pub fn put_double_array(self, key: impl Into<String>, value: &[f64]) -> Self {
        self.put(key, value.to_vec())
    }

    pub fn put_string_array(self, key: impl Into<String>, value: &[Option<&str>]) -> Self {
        let items: Vec<Option<String>> = value
            .iter()
            .map(|item| item.map(String::from))
            .collect();
        self.put(key, items)
    }

    /// 复制另一个 `Data` 的所有条目
    pub fn put_all(mut self, data: &Data) -> Self {
        self.values
            .extend(data.iter().map(|(key, value)| (key.to_owned(), value.clone())));
        self
    }

    /// 批量写入键值对
    pub fn put_all_values<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.values
            .extend(entries.into_iter().map(|(key, value)| (key.into(), value.into())));
        self
    }

    /// 生成不可变的 `Data`
    ///
    /// # 错误
    /// 序列化后超过上限时返回 `DataError::TooLarge`。
    pub fn build(self) -> Result<Data, DataError> {
        let size = codec::encode(&self.values)?.len();
        if size > self.max_bytes {
            warn!(size, limit = self.max_bytes, "rejecting oversized data");
            return Err(DataError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(Data::from_values(self.values))
    }
}

impl From<&Data> for DataBuilder {
    fn from(data: &Data) -> Self {
        Self::new().put_all(data)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn later_put_replaces_earlier() {
        let data = DataBuilder::new()
            .put_int("key", 1)
            .put_string("key", Some("two"))
            .build()
            .unwrap();
        assert_eq!(data.size(), 1);
        assert_eq!(data.get_string("key"), Some("two"));
        assert_eq!(data.get_int("key", 0), 0);
    }

    #[test]
    fn rejects_oversized_data() {
        let err = DataBuilder::new()
            .put_byte_array("blob", &[0; MAX_DATA_BYTES])
            .build()
            .unwrap_err();
        assert!(matches!(err, DataError::TooLarge { limit: MAX_DATA_BYTES, .. }));
    }

    #[test]
    fn custom_limit() {
        let builder = DataBuilder::new().max_bytes(16).put_string("k", Some("a long value"));
        assert!(matches!(
            builder.clone().build(),
            Err(DataError::TooLarge { limit: 16, .. })
        ));
        assert!(builder.max_bytes(64).build().is_ok());
    }

    #[test]
    fn limit_cannot_be_raised_above_default() {
        let err = DataBuilder::new()
            .max_bytes(64 * 1024)
            .put_byte_array("blob", &[1; 20 * 1024])
            .build()
            .unwrap_err();
        assert!(matches!(err, DataError::TooLarge { limit: MAX_DATA_BYTES, .. }));
    }

    #[test]
    fn builder_from_data_copies_entries() {
        let original = DataBuilder::new()
            .put_bool("flag", true)
            .put_long("id", 42)
            .build()
            .unwrap();
        let extended = DataBuilder::from(&original)
            .put_double("ratio", 0.5)
            .build()
            .unwrap();
        assert_eq!(extended.size(), 3);
        assert!(extended.get_bool("flag", false));
        assert_eq!(extended.get_long("id", 0), 42);
    }

    #[test]
    fn put_all_values_accepts_pairs() {
        let data = DataBuilder::new()
            .put_all_values([("a", 1), ("b", 2)])
            .build()
            .unwrap();
        assert_eq!(data.get_int("a", 0), 1);
        assert_eq!(data.get_int("b", 0), 2);
    }
}
