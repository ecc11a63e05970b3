//! 通用类型定义

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 局部更新字段
///
/// 区分三种状态：
/// - `Unchanged`: 请求中未出现该字段
/// - `Clear`: 字段显式为 `null`
/// - `Set(v)`: 字段给出了新值
///
/// 反序列化时需配合 `#[serde(default)]` 使用，缺失的字段才会落到 `Unchanged`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }

    /// 应用到非空字段，`Clear` 不生效
    ///
    /// 返回字段是否被改写
    pub fn apply_to(self, target: &mut T) -> bool {
        match self {
            Self::Set(value) => {
                *target = value;
                true
            }
            Self::Unchanged | Self::Clear => false,
        }
    }

    /// 应用到可空字段
    pub fn apply_to_option(self, target: &mut Option<T>) -> bool {
        match self {
            Self::Unchanged => false,
            Self::Clear => {
                *target = None;
                true
            }
            Self::Set(value) => {
                *target = Some(value);
                true
            }
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        })
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Unchanged | Self::Clear => serializer.serialize_none(),
        }
    }
}
