//! 统一错误处理模块
//!
//! 使用宏生成错误枚举，每个变体带错误代码与类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 生成 enum、code()/error_type()/message() 以及 snake_case 构造函数
macro_rules! define_codeaura_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CodeAuraError {
            $($variant(String),)*
        }

        impl CodeAuraError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CodeAuraError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CodeAuraError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(CodeAuraError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl CodeAuraError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CodeAuraError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_codeaura_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Io("E006", "IO Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Gateway("E010", "Payment Gateway Error"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    Conflict("E014", "Resource Conflict"),
}

impl CodeAuraError {
    /// 彩色输出，仅开发构建
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CodeAuraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CodeAuraError {}

impl From<sea_orm::DbErr> for CodeAuraError {
    fn from(err: sea_orm::DbErr) -> Self {
        CodeAuraError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CodeAuraError {
    fn from(err: std::io::Error) -> Self {
        CodeAuraError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CodeAuraError {
    fn from(err: serde_json::Error) -> Self {
        CodeAuraError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CodeAuraError {
    fn from(err: chrono::ParseError) -> Self {
        CodeAuraError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for CodeAuraError {
    fn from(err: reqwest::Error) -> Self {
        CodeAuraError::Gateway(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodeAuraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CodeAuraError::cache_connection("test").code(), "E001");
        assert_eq!(CodeAuraError::database_config("test").code(), "E003");
        assert_eq!(CodeAuraError::validation("test").code(), "E007");
        assert_eq!(CodeAuraError::gateway("test").code(), "E010");
        assert_eq!(CodeAuraError::conflict("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CodeAuraError::not_found("batch 3").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            CodeAuraError::gateway("timeout").error_type(),
            "Payment Gateway Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = CodeAuraError::validation("Phone must be 10 digits");
        assert_eq!(
            err.format_simple(),
            "Validation Error: Phone must be 10 digits"
        );
        assert_eq!(err.to_string(), err.format_simple());
    }

    #[test]
    fn test_from_db_err() {
        let err: CodeAuraError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("boom"));
    }
}
