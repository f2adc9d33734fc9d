//! 字段校验
//!
//! 错误以 `字段 -> [消息]` 的形式收集，嵌套对象得到嵌套映射，直接放入响应的 `data`。

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";
pub const MSG_INVALID_URL: &str = "Enter a valid URL.";
pub const MSG_INVALID_NUMBER: &str = "A valid number is required.";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)https?://([A-Za-z0-9-]+\.)*[A-Za-z0-9-]+(\.[A-Za-z]{2,})?(:\d{1,5})?(/[^\s]*)?$")
        .expect("Invalid url regex")
});

pub fn max_length_message(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

pub fn min_length_message(min: usize) -> String {
    format!("Ensure this field has at least {min} characters.")
}

pub fn invalid_choice_message(value: impl std::fmt::Display) -> String {
    format!("\"{value}\" is not a valid choice.")
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_url(url: &str) -> bool {
    URL_RE.is_match(url)
}

/// 字段错误集合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    fields: Map<String, Value>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let entry = self
            .fields
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(messages) = entry {
            messages.push(Value::String(message.into()));
        }
    }

    /// 嵌套对象的错误，空集合忽略
    pub fn nest(&mut self, field: &str, inner: FieldErrors) {
        if !inner.is_empty() {
            self.fields
                .insert(field.to_string(), Value::Object(inner.fields));
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// 文本字段规则
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub required: bool,
    pub allow_blank: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl TextRule {
    pub const fn required(max: usize) -> Self {
        Self {
            required: true,
            allow_blank: false,
            min: None,
            max: Some(max),
        }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            required: true,
            allow_blank: false,
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn blank_ok(max: usize) -> Self {
        Self {
            required: false,
            allow_blank: true,
            min: None,
            max: Some(max),
        }
    }

    /// 部分更新时缺省字段不报错
    pub const fn partial(self, partial: bool) -> Self {
        Self {
            required: self.required && !partial,
            ..self
        }
    }
}

/// 校验文本字段，长度按字符计
pub fn check_text(errors: &mut FieldErrors, field: &str, value: Option<&str>, rule: TextRule) {
    let Some(value) = value else {
        if rule.required {
            errors.add(field, MSG_REQUIRED);
        }
        return;
    };

    if value.trim().is_empty() {
        if !rule.allow_blank {
            errors.add(field, MSG_BLANK);
        }
        return;
    }

    let len = value.chars().count();
    if let Some(max) = rule.max
        && len > max
    {
        errors.add(field, max_length_message(max));
    }
    if let Some(min) = rule.min
        && len < min
    {
        errors.add(field, min_length_message(min));
    }
}

pub fn check_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if !value.trim().is_empty() && !is_valid_email(value) {
        errors.add(field, MSG_INVALID_EMAIL);
    }
}

/// 可选 URL，空串表示清除
pub fn check_optional_url(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    if let Some(url) = value
        && !url.is_empty()
        && !is_valid_url(url)
    {
        errors.add(field, MSG_INVALID_URL);
    }
}

pub fn check_required<T>(errors: &mut FieldErrors, field: &str, value: Option<&T>) {
    if value.is_none() {
        errors.add(field, MSG_REQUIRED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_field() {
        let mut errors = FieldErrors::new();
        check_text(&mut errors, "topic", None, TextRule::required(60));
        assert_eq!(
            errors.into_value(),
            serde_json::json!({ "topic": [MSG_REQUIRED] })
        );
    }

    #[test]
    fn test_partial_skips_missing_field() {
        let mut errors = FieldErrors::new();
        check_text(&mut errors, "topic", None, TextRule::required(60).partial(true));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_blank_and_length() {
        let mut errors = FieldErrors::new();
        check_text(&mut errors, "title", Some("   "), TextRule::between(3, 100));
        check_text(&mut errors, "content", Some("abc"), TextRule::between(5, 10000));
        check_text(&mut errors, "details", Some(""), TextRule::blank_ok(256));
        check_text(
            &mut errors,
            "topic",
            Some(&"x".repeat(61)),
            TextRule::required(60),
        );

        let value = errors.into_value();
        assert_eq!(value["title"][0], MSG_BLANK);
        assert_eq!(value["content"][0], min_length_message(5));
        assert_eq!(value["topic"][0], max_length_message(60));
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_length_counts_characters() {
        let mut errors = FieldErrors::new();
        check_text(&mut errors, "title", Some("Урок"), TextRule::between(3, 4));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_nested_errors() {
        let mut inner = FieldErrors::new();
        inner.add("number", invalid_choice_message(0));
        let mut errors = FieldErrors::new();
        errors.nest("clazz", inner);
        errors.nest("user", FieldErrors::new());

        assert_eq!(
            errors.into_value(),
            serde_json::json!({ "clazz": { "number": ["\"0\" is not a valid choice."] } })
        );
    }

    #[test]
    fn test_email_and_url() {
        assert!(is_valid_email("student@example.com"));
        assert!(!is_valid_email("student@"));
        assert!(is_valid_url("https://www.youtube.com/watch?v=abc"));
        assert!(is_valid_url("http://localhost:8080/img.png"));
        assert!(!is_valid_url("youtube"));

        let mut errors = FieldErrors::new();
        check_optional_url(&mut errors, "video_url", Some(""));
        assert!(errors.is_empty());
        check_optional_url(&mut errors, "video_url", Some("not a url"));
        assert!(errors.contains("video_url"));
    }
}
