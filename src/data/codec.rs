//! `Data` 的字节流格式（大端序）
//!
//! ```text
//! magic   u16 = 0xABEF
//! version u16 = 1
//! count   u32
//! 每个条目:
//!   key     u32 长度 + UTF-8
//!   tag     u8  标量类型，数组为 0x80 | 元素类型
//!   payload 标量，或 u32 元素个数 + 元素
//! ```
//! 字符串数组的每个元素前有一个 u8 标志，0 表示空元素。

use std::collections::BTreeMap;

use bytes::{Buf, BufMut};

use crate::error::DataError;
use crate::prelude::*;
use super::Value;

const TAG_NULL: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_BYTE: u8 = 2;
const TAG_INT: u8 = 3;
const TAG_LONG: u8 = 4;
const TAG_FLOAT: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_STRING: u8 = 7;
const TAG_ARRAY: u8 = 0x80;

/// 编码所有条目
pub(crate) fn encode(values: &BTreeMap<String, Value>) -> Result<Vec<u8>, DataError> {
    let mut buf = Vec::new();
    buf.put_u16(STREAM_MAGIC);
    buf.put_u16(STREAM_VERSION);
    buf.put_u32(len_to_u32(values.len())?);
    for (key, value) in values {
        put_str(&mut buf, key)?;
        put_value(&mut buf, value)?;
    }
    Ok(buf)
}

/// 解码字节流；任何错误都不会返回部分数据
pub(crate) fn decode(mut buf: &[u8]) -> Result<BTreeMap<String, Value>, DataError> {
    ensure(buf, 8)?;
    let magic = buf.get_u16();
    if magic != STREAM_MAGIC {
        return Err(DataError::BadMagic { found: magic });
    }
    let version = buf.get_u16();
    if version != STREAM_VERSION {
        return Err(DataError::UnsupportedVersion { found: version });
    }
    let count = buf.get_u32();

    let mut values = BTreeMap::new();
    for _ in 0..count {
        let key = get_string(&mut buf, "key")?;
        let value = get_value(&mut buf)?;
        if values.contains_key(&key) {
            return Err(DataError::DuplicateKey { key });
        }
        values.insert(key, value);
    }

    if buf.has_remaining() {
        return Err(DataError::TrailingBytes {
            remaining: buf.remaining(),
        });
    }
    Ok(values)
}

fn len_to_u32(len: usize) -> Result<u32, DataError> {
    u32::try_from(len).map_err(|_| DataError::LengthOverflow { len })
}

fn put_str(buf: &mut Vec<u8>, string: &str) -> Result<(), DataError> {
    buf.put_u32(len_to_u32(string.len())?);
    buf.put_slice(string.as_bytes());
    Ok(())
}

fn put_value(buf: &mut Vec<u8>, value: &Value) -> Result<(), DataError> {
    match value {
        Value::Null => buf.put_u8(TAG_NULL),
        Value::Bool(value) => {
            buf.put_u8(TAG_BOOL);
            buf.put_u8(u8::from(*value));
        }
        Value::Byte(value) => {
            buf.put_u8(TAG_BYTE);
            buf.put_i8(*value);
        }
        Value::Int(value) => {
            buf.put_u8(TAG_INT);
            buf.put_i32(*value);
        }
        Value::Long(value) => {
            buf.put_u8(TAG_LONG);
            buf.put_i64(*value);
        }
        Value::Float(value) => {
            buf.put_u8(TAG_FLOAT);
            buf.put_f32(*value);
        }
        Value::Double(value) => {
            buf.put_u8(TAG_DOUBLE);
            buf.put_f64(*value);
        }
        Value::String(value) => {
            buf.put_u8(TAG_STRING);
            put_str(buf, value)?;
        }
        Value::BoolArray(items) => {
            put_array_header(buf, TAG_BOOL, items.len())?;
            items.iter().for_each(|item| buf.put_u8(u8::from(*item)));
        }
        Value::ByteArray(items) => {
            put_array_header(buf, TAG_BYTE, items.len())?;
            items.iter().for_each(|item| buf.put_i8(*item));
        }
        Value::IntArray(items) => {
            put_array_header(buf, TAG_INT, items.len())?;
            items.iter().for_each(|item| buf.put_i32(*item));
        }
        Value::LongArray(items) => {
            put_array_header(buf, TAG_LONG, items.len())?;
            items.iter().for_each(|item| buf.put_i64(*item));
        }
        Value::FloatArray(items) => {
            put_array_header(buf, TAG_FLOAT, items.len())?;
            items.iter().for_each(|item| buf.put_f32(*item));
        }
        Value::DoubleArray(items) => {
            put_array_header(buf, TAG_DOUBLE, items.len())?;
            items.iter().for_each(|item| buf.put_f64(*item));
        }
        Value::StringArray(items) => {
            put_array_header(buf, TAG_STRING, items.len())?;
            for item in items {
                match item {
                    Some(item) => {
                        buf.put_u8(1);
                        put_str(buf, item)?;
                    }
                    None => buf.put_u8(0),
                }
            }
        }
    }
    Ok(())
}

fn put_array_header(buf: &mut Vec<u8>, element_tag: u8, len: usize) -> Result<(), DataError> {
    buf.put_u8(TAG_ARRAY | element_tag);
    buf.put_u32(len_to_u32(len)?);
    Ok(())
}

// `Buf::get_*` 在数据不足时会 panic，所以读取前先检查
fn ensure(buf: &[u8], needed: usize) -> Result<(), DataError> {
    if buf.len() < needed {
        return Err(DataError::Truncated {
            needed: needed.saturating_sub(buf.len()),
        });
    }
    Ok(())
}

fn get_len(buf: &mut &[u8]) -> Result<usize, DataError> {
    ensure(buf, 4)?;
    // u32 总能放进 usize（本库不支持 16 位平台）
    #[allow(clippy::as_conversions)]
    let len = buf.get_u32() as usize;
    Ok(len)
}

fn get_string(buf: &mut &[u8], context: &'static str) -> Result<String, DataError> {
    let len = get_len(buf)?;
    ensure(buf, len)?;
    let slice: &[u8] = *buf;
    let (head, rest) = slice.split_at(len);
    let string = std::str::from_utf8(head)
        .map_err(|_| DataError::InvalidUtf8 { context })?
        .to_owned();
    *buf = rest;
    Ok(string)
}

// 只接受 0 和 1，保证解码后再编码得到相同的字节
fn get_bool(buf: &mut &[u8]) -> Result<bool, DataError> {
    match buf.get_u8() {
        0 => Ok(false),
        1 => Ok(true),
        byte => Err(DataError::InvalidBool { byte }),
    }
}

// 读取定长元素数组，先确认剩余字节足够，避免按恶意长度预分配
fn get_fixed_array<T>(
    buf: &mut &[u8],
    element_size: usize,
    read: impl Fn(&mut &[u8]) -> Result<T, DataError>,
) -> Result<Vec<T>, DataError> {
    let len = get_len(buf)?;
    let total = len
        .checked_mul(element_size)
        .ok_or(DataError::LengthOverflow { len })?;
    ensure(buf, total)?;
    (0..len).map(|_| read(buf)).collect()
}

fn get_value(buf: &mut &[u8]) -> Result<Value, DataError> {
    ensure(buf, 1)?;
    let tag = buf.get_u8();
    let value = match tag {
        TAG_NULL => Value::Null,
        TAG_BOOL => {
            ensure(buf, 1)?;
            Value::Bool(get_bool(buf)?)
        }
        TAG_BYTE => {
            ensure(buf, 1)?;
            Value::Byte(buf.get_i8())
        }
        TAG_INT => {
            ensure(buf, 4)?;
            Value::Int(buf.get_i32())
        }
        TAG_LONG => {
            ensure(buf, 8)?;
            Value::Long(buf.get_i64())
        }
        TAG_FLOAT => {
            ensure(buf, 4)?;
            Value::Float(buf.get_f32())
        }
        TAG_DOUBLE => {
            ensure(buf, 8)?;
            Value::Double(buf.get_f64())
        }
        TAG_STRING => Value::String(get_string(buf, "string value")?),
        tag if tag == TAG_ARRAY | TAG_BOOL => {
            Value::BoolArray(get_fixed_array(buf, 1, get_bool)?)
        }
        tag if tag == TAG_ARRAY | TAG_BYTE => {
            Value::ByteArray(get_fixed_array(buf, 1, |buf| Ok(buf.get_i8()))?)
        }
        tag if tag == TAG_ARRAY | TAG_INT => {
            Value::IntArray(get_fixed_array(buf, 4, |buf| Ok(buf.get_i32()))?)
        }
        tag if tag == TAG_ARRAY | TAG_LONG => {
            Value::LongArray(get_fixed_array(buf, 8, |buf| Ok(buf.get_i64()))?)
        }
        tag if tag == TAG_ARRAY | TAG_FLOAT => {
            Value::FloatArray(get_fixed_array(buf, 4, |buf| Ok(buf.get_f32()))?)
        }
        tag if tag == TAG_ARRAY | TAG_DOUBLE => {
            Value::DoubleArray(get_fixed_array(buf, 8, |buf| Ok(buf.get_f64()))?)
        }
        tag if tag == TAG_ARRAY | TAG_STRING => {
            let len = get_len(buf)?;
            // 每个元素至少占一个标志字节
            ensure(buf, len)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                ensure(buf, 1)?;
                let item = match buf.get_u8() {
                    0 => None,
                    _ => Some(get_string(buf, "string array element")?),
                };
                items.push(item);
            }
            Value::StringArray(items)
        }
        unknown => return Err(DataError::UnknownTag { tag: unknown }),
    };
    Ok(value)
}
