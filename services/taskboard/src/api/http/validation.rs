//! 请求体字段校验

use taskboard_common::Patch;
use taskboard_errors::{AppError, FieldError};

use crate::domain::Priority;

/// 字段错误收集器
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldError>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    /// 必填文本：非空白且不超过 `max` 个字符
    pub fn required_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        match value {
            None => self.push(field, "is required"),
            Some(value) => self.text(field, value, max),
        }
    }

    /// 局部更新中的非空文本字段：不能为 null
    pub fn patch_text(&mut self, field: &str, value: &Patch<String>, max: usize) {
        match value {
            Patch::Unchanged => {}
            Patch::Clear => self.push(field, "must not be null"),
            Patch::Set(value) => self.text(field, value, max),
        }
    }

    pub fn not_null<T>(&mut self, field: &str, value: &Patch<T>) {
        if value.is_clear() {
            self.push(field, "must not be null");
        }
    }

    pub fn priority(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            if value.parse::<Priority>().is_err() {
                self.push(field, "must be one of low, medium, high");
            }
        }
    }

    pub fn matches(
        &mut self,
        field: &str,
        value: Option<&str>,
        ok: impl Fn(&str) -> bool,
        message: &str,
    ) {
        if let Some(value) = value {
            if !ok(value) {
                self.push(field, message);
            }
        }
    }

    pub fn into_result(self) -> Result<(), Vec<FieldError>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }

    fn text(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.push(field, "must not be empty");
        } else if value.chars().count() > max {
            self.push(field, format!("must be at most {max} characters"));
        }
    }
}

/// 校验失败转换为 400 问题详情
pub fn reject(errors: Vec<FieldError>) -> AppError {
    AppError::validation_failed(errors)
}

/// 解析已校验过的优先级
pub fn parse_priority(field: &str, value: &str) -> Result<Priority, AppError> {
    value
        .parse()
        .map_err(|e: crate::domain::UnknownPriority| {
            reject(vec![FieldError::new(field, e.to_string())])
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        let mut v = Violations::new();
        v.required_text("title", None, 10);
        v.required_text("title", Some("   "), 10);
        v.required_text("title", Some("eleven chars"), 10);
        v.required_text("title", Some("fine"), 10);

        let errors = v.into_result().unwrap_err();
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "is required",
                "must not be empty",
                "must be at most 10 characters"
            ]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let mut v = Violations::new();
        v.required_text("name", Some("ééééé"), 5);
        assert!(v.into_result().is_ok());
    }

    #[test]
    fn test_patch_text_rejects_null() {
        let mut v = Violations::new();
        v.patch_text("title", &Patch::Unchanged, 255);
        v.patch_text("title", &Patch::Set("Buy bread".to_string()), 255);
        v.patch_text("title", &Patch::Clear, 255);
        let errors = v.into_result().unwrap_err();
        assert_eq!(errors, vec![FieldError::new("title", "must not be null")]);
    }

    #[test]
    fn test_priority() {
        let mut v = Violations::new();
        v.priority("priority", Some("high"));
        v.priority("priority", None);
        assert!(v.into_result().is_ok());

        let mut v = Violations::new();
        v.priority("priority", Some("urgent"));
        assert_eq!(v.into_result().unwrap_err()[0].field, "priority");
    }
}
