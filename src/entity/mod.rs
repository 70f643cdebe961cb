//! SeaORM 实体定义
//!
//! 与 models 中的业务实体分离，Storage 层读写后通过 `into_*` 转换。

pub mod prelude;

pub mod admins;
pub mod batches;
pub mod courses;
pub mod enrollments;
pub mod notes;
pub mod notifications;
pub mod payments;
pub mod students;
pub mod course_tests;
pub mod videos;

use chrono::{DateTime, Utc};

/// 数据库中的秒级时间戳转换为 UTC 时间
pub(crate) fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}
