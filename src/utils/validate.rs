use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid phone regex"));

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid date regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Invalid email format");
    }
    Ok(())
}

/// 手机号：恰好 10 位数字
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone must be 10 digits");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required");
    }
    if name.chars().count() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

/// ISO 日期（YYYY-MM-DD），同时校验日期本身合法
pub fn validate_iso_date(date: &str) -> Result<(), &'static str> {
    if !DATE_RE.is_match(date) || chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err("Invalid date format, expected YYYY-MM-DD");
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
/// 至少 8 个字符，同时包含字母和数字，且不在常见弱密码列表中。
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if password.chars().count() > 128 {
        errors.push("Password must be at most 128 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password1",
        "password123",
        "12345678a",
        "qwerty123",
        "admin123",
        "welcome1",
        "abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("asha@example.com", true)]
    #[case("first.last+tag@mail.co.in", true)]
    #[case("no-at-sign.com", false)]
    #[case("a@b", false)]
    #[case("", false)]
    fn test_email(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(validate_email(email).is_ok(), ok);
    }

    #[rstest]
    #[case("9876543210", true)]
    #[case("987654321", false)]
    #[case("98765432100", false)]
    #[case("98765-4321", false)]
    #[case("+919876543", false)]
    fn test_phone(#[case] phone: &str, #[case] ok: bool) {
        assert_eq!(validate_phone(phone).is_ok(), ok);
    }

    #[rstest]
    #[case("2025-04-01", true)]
    #[case("2025-02-30", false)]
    #[case("01-04-2025", false)]
    #[case("2025-4-1", false)]
    fn test_iso_date(#[case] date: &str, #[case] ok: bool) {
        assert_eq!(validate_iso_date(date).is_ok(), ok);
    }

    #[rstest]
    #[case("Learn2Code", true)]
    #[case("study2025", true)]
    #[case("short1", false)]
    #[case("onlyletters", false)]
    #[case("1234567890", false)]
    #[case("Password123", false)]
    fn test_password_policy(#[case] password: &str, #[case] ok: bool) {
        assert_eq!(validate_password(password).is_valid, ok);
    }

    #[test]
    fn test_password_errors_are_joined() {
        let message = validate_password_simple("abc").unwrap_err();
        assert!(message.contains("at least 8 characters"));
        assert!(message.contains("at least one digit"));
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Asha Rao").is_ok());
    }
}
