use serde::{Deserialize, Serialize};

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub course_type: String,
    pub fee: f64,
    pub duration: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub syllabus: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程视频
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub video_url: String,
    /// 秒
    pub duration: Option<i32>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 课程讲义 (PDF)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub pdf_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 课程测验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Test {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub questions_json: String,
    /// 分钟
    pub duration: Option<i32>,
    pub passing_score: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 测验列表项，不含题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSummary {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub duration: Option<i32>,
    pub passing_score: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Test> for TestSummary {
    fn from(t: Test) -> Self {
        Self {
            id: t.id,
            course_id: t.course_id,
            title: t.title,
            duration: t.duration,
            passing_score: t.passing_score,
            created_at: t.created_at,
        }
    }
}

/// 嵌入到批次和报名中的精简课程信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseBrief {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub course_type: String,
    pub fee: f64,
}

impl From<Course> for CourseBrief {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            name: c.name,
            course_type: c.course_type,
            fee: c.fee,
        }
    }
}
