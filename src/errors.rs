//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_courseapp_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum CourseAppError {
            $($variant(String),)*
        }

        impl CourseAppError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CourseAppError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CourseAppError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CourseAppError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CourseAppError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseAppError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_courseapp_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Resource Conflict"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    InvalidReference("E013", "Invalid Reference"),
    UnsupportedOperation("E014", "Unsupported Operation"),
    MissingAssignment("E015", "Missing Assignment"),
    Io("E016", "IO Error"),
}

impl CourseAppError {
    /// 调用方可以修正输入后重试的错误
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CourseAppError::Validation(_)
                | CourseAppError::NotFound(_)
                | CourseAppError::Conflict(_)
                | CourseAppError::Authentication(_)
                | CourseAppError::Authorization(_)
                | CourseAppError::InvalidReference(_)
                | CourseAppError::UnsupportedOperation(_)
                | CourseAppError::MissingAssignment(_)
        )
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CourseAppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CourseAppError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CourseAppError {
    fn from(err: sea_orm::DbErr) -> Self {
        CourseAppError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CourseAppError {
    fn from(err: std::io::Error) -> Self {
        CourseAppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CourseAppError {
    fn from(err: serde_json::Error) -> Self {
        CourseAppError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CourseAppError {
    fn from(err: chrono::ParseError) -> Self {
        CourseAppError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourseAppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CourseAppError::cache_connection("test").code(), "E001");
        assert_eq!(CourseAppError::database_config("test").code(), "E003");
        assert_eq!(CourseAppError::validation("test").code(), "E006");
        assert_eq!(CourseAppError::missing_assignment("test").code(), "E015");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CourseAppError::invalid_reference("test").error_type(),
            "Invalid Reference"
        );
        assert_eq!(
            CourseAppError::unsupported_operation("test").error_type(),
            "Unsupported Operation"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CourseAppError::validation("no score provided");
        assert_eq!(err.message(), "no score provided");
    }

    #[test]
    fn test_client_errors() {
        assert!(CourseAppError::missing_assignment("x").is_client_error());
        assert!(CourseAppError::invalid_reference("x").is_client_error());
        assert!(!CourseAppError::database_operation("x").is_client_error());
        assert!(!CourseAppError::serialization("x").is_client_error());
    }

    #[test]
    fn test_format_simple() {
        let err = CourseAppError::unsupported_operation("not supported task");
        let formatted = err.format_simple();
        assert!(formatted.contains("Unsupported Operation"));
        assert!(formatted.contains("not supported task"));
    }
}
