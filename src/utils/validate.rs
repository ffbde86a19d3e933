use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

// GitHub 登录名：字母数字与单个连字符，不能以连字符开头或结尾
static GITHUB_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9]|-[A-Za-z0-9])*$").expect("Invalid github id regex")
});

static ALIAS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("Invalid course alias regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_github_id(github_id: &str) -> Result<(), &'static str> {
    if github_id.is_empty() || github_id.len() > 39 {
        return Err("GitHub id length must be between 1 and 39 characters");
    }
    if !GITHUB_ID_RE.is_match(github_id) {
        return Err("GitHub id must contain only letters, numbers and single hyphens");
    }
    Ok(())
}

pub fn validate_course_alias(alias: &str) -> Result<(), &'static str> {
    if alias.len() < 2 || alias.len() > 64 {
        return Err("Course alias length must be between 2 and 64 characters");
    }
    if !ALIAS_RE.is_match(alias) {
        return Err("Course alias must contain only lowercase letters, numbers or hyphens");
    }
    Ok(())
}

/// 作业链接必须是 http(s) 地址
pub fn validate_solution_url(url: &str) -> Result<(), &'static str> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or("Solution url must start with http:// or https://")?;
    if rest.is_empty() || rest.starts_with('/') || url.chars().any(char::is_whitespace) {
        return Err("Solution url is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_ids() {
        assert!(validate_github_id("octocat").is_ok());
        assert!(validate_github_id("rolling-scopes-2").is_ok());
        assert!(validate_github_id("-leading").is_err());
        assert!(validate_github_id("trailing-").is_err());
        assert!(validate_github_id("double--hyphen").is_err());
        assert!(validate_github_id("").is_err());
        assert!(validate_github_id(&"a".repeat(40)).is_err());
    }

    #[test]
    fn test_course_alias() {
        assert!(validate_course_alias("js-fe-2026q1").is_ok());
        assert!(validate_course_alias("JS").is_err());
        assert!(validate_course_alias("a").is_err());
    }

    #[test]
    fn test_solution_url() {
        assert!(validate_solution_url("https://github.com/octocat/songbird").is_ok());
        assert!(validate_solution_url("http://localhost:8080/demo").is_ok());
        assert!(validate_solution_url("ftp://example.com").is_err());
        assert!(validate_solution_url("https://").is_err());
        assert!(validate_solution_url("https://exa mple.com").is_err());
    }

    #[test]
    fn test_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_valid);
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(!validate_password("Ab1").is_valid);
    }
}
