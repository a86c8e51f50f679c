use std::fmt::{self, Display};

/// `Data` 支持的值类型
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    Byte,
    Int,
    Long,
    Float,
    Double,
    String,
    BoolArray,
    ByteArray,
    IntArray,
    LongArray,
    FloatArray,
    DoubleArray,
    StringArray,
}

/// `Data` 中保存的一个值
///
/// 只允许基本类型、字符串以及它们的数组。浮点数按位比较，所以 NaN 与自身相等。
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    BoolArray(Vec<bool>),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    // 字符串数组允许包含空元素
    StringArray(Vec<Option<String>>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Bool(_) => ValueType::Bool,
            Self::Byte(_) => ValueType::Byte,
            Self::Int(_) => ValueType::Int,
            Self::Long(_) => ValueType::Long,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
            Self::BoolArray(_) => ValueType::BoolArray,
            Self::ByteArray(_) => ValueType::ByteArray,
            Self::IntArray(_) => ValueType::IntArray,
            Self::LongArray(_) => ValueType::LongArray,
            Self::FloatArray(_) => ValueType::FloatArray,
            Self::DoubleArray(_) => ValueType::DoubleArray,
            Self::StringArray(_) => ValueType::StringArray,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::BoolArray(a), Self::BoolArray(b)) => a == b,
            (Self::ByteArray(a), Self::ByteArray(b)) => a == b,
            (Self::IntArray(a), Self::IntArray(b)) => a == b,
            (Self::LongArray(a), Self::LongArray(b)) => a == b,
            (Self::FloatArray(a), Self::FloatArray(b)) => {
                a.iter().map(|v| v.to_bits()).eq(b.iter().map(|v| v.to_bits()))
            }
            (Self::DoubleArray(a), Self::DoubleArray(b)) => {
                a.iter().map(|v| v.to_bits()).eq(b.iter().map(|v| v.to_bits()))
            }
            (Self::StringArray(a), Self::StringArray(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Self::Byte(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

// `None` 保存为空值
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Vec<bool>> for Value {
    fn from(value: Vec<bool>) -> Self {
        Self::BoolArray(value)
    }
}

impl From<Vec<i8>> for Value {
    fn from(value: Vec<i8>) -> Self {
        Self::ByteArray(value)
    }
}

impl From<Vec<i32>> for Value {
    fn from(value: Vec<i32>) -> Self {
        Self::IntArray(value)
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Self::LongArray(value)
    }
}

impl From<Vec<f32>> for Value {
    fn from(value: Vec<f32>) -> Self {
        Self::FloatArray(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Self::DoubleArray(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::StringArray(value.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<String>>> for Value {
    fn from(value: Vec<Option<String>>) -> Self {
        Self::StringArray(value)
    }
}

// 数组输出形如 `[1, 2, 3]`
fn write_array<T: Display>(formatter: &mut fmt::Formatter, items: &[T]) -> fmt::Result {
    write!(formatter, "[")?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(formatter, ", ")?;
        }
        write!(formatter, "{item}")?;
    }
    write!(formatter, "]")
}

impl Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Null => write!(formatter, "null"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Byte(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Long(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Double(value) => write!(formatter, "{value}"),
            Self::String(value) => write!(formatter, "{value}"),
            Self::BoolArray(items) => write_array(formatter, items),
            Self::ByteArray(items) => write_array(formatter, items),
            Self::IntArray(items) => write_array(formatter, items),
            Self::LongArray(items) => write_array(formatter, items),
            Self::FloatArray(items) => write_array(formatter, items),
            Self::DoubleArray(items) => write_array(formatter, items),
            Self::StringArray(items) => {
                let items: Vec<&str> = items
                    .iter()
                    .map(|item| item.as_deref().unwrap_or("null"))
                    .collect();
                write_array(formatter, &items)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_becomes_null() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String(String::from("x")));
    }

    #[test]
    fn floats_compare_by_bits() {
        assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(
            Value::FloatArray(vec![f32::NAN, 1.0]),
            Value::FloatArray(vec![f32::NAN, 1.0])
        );
    }

    #[test]
    fn same_payload_different_type_is_not_equal() {
        assert_ne!(Value::Int(1), Value::Long(1));
        assert_ne!(Value::IntArray(vec![]), Value::LongArray(vec![]));
    }

    #[test]
    fn display_arrays() {
        assert_eq!(Value::IntArray(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(
            Value::StringArray(vec![Some(String::from("a")), None]).to_string(),
            "[a, null]"
        );
    }
}
