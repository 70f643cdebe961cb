use serde::{Deserialize, Deserializer, Serialize};

// 分页查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        alias = "per_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

/// 每页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;
/// 页码上限，保证 page * size 不溢出
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// 存储层使用的分页归一化，page 从 1 开始，size 限制在 1..=100
pub fn normalize_page(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let page = page.unwrap_or(1).clamp(1, MAX_PAGE) as u64;
    let size = size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE) as u64;
    (page, size)
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

impl<T> PaginatedResponse<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// 与 `#[serde(flatten)]` 一起使用时查询参数都是字符串，这里兼容两种形式
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(v)) => Ok(Some(v)),
        Some(Raw::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: '{s}'"))),
    }
}

/// 接受 true/false/1/0 及对应字符串
pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(b)) => Ok(Some(b)),
        Some(Raw::Int(i)) => Ok(Some(i != 0)),
        Some(Raw::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" | "" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean: '{other}'"
            ))),
        },
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct ListQuery {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        course_id: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        unread_only: Option<bool>,
    }

    #[test]
    fn test_query_string_defaults() {
        let q = actix_web::web::Query::<ListQuery>::from_query("")
            .unwrap()
            .into_inner();
        assert_eq!(q.pagination.page, 1);
        assert_eq!(q.pagination.size, 10);
        assert_eq!(q.course_id, None);
        assert_eq!(q.unread_only, None);
    }

    #[test]
    fn test_query_string_values() {
        let q = actix_web::web::Query::<ListQuery>::from_query(
            "page=3&size=500&course_id=7&unread_only=true",
        )
        .unwrap()
        .into_inner();
        assert_eq!(q.pagination.page, 3);
        assert_eq!(q.course_id, Some(7));
        assert_eq!(q.unread_only, Some(true));
        assert_eq!(
            normalize_page(Some(q.pagination.page), Some(q.pagination.size)),
            (3, 100)
        );
    }

    #[test]
    fn test_per_page_alias() {
        let q = actix_web::web::Query::<ListQuery>::from_query("page=2&per_page=25")
            .unwrap()
            .into_inner();
        assert_eq!(q.pagination.page, 2);
        assert_eq!(q.pagination.size, 25);
    }

    #[test]
    fn test_invalid_page_rejected() {
        assert!(actix_web::web::Query::<ListQuery>::from_query("page=abc").is_err());
    }

    #[test]
    fn test_normalize_page() {
        assert_eq!(normalize_page(None, None), (1, 10));
        assert_eq!(normalize_page(Some(-4), Some(0)), (1, 1));
    }

    #[test]
    fn test_huge_page_does_not_overflow_offset() {
        let (page, size) = normalize_page(Some(i64::MAX), Some(100));
        assert_eq!(page, MAX_PAGE as u64);
        assert!(page.checked_mul(size).is_some_and(|offset| offset <= i64::MAX as u64));
    }
}
