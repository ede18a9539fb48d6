use crate::error::{AppError, AppResult};
use chrono::NaiveDate;

/// 必填字符串字段校验（去除首尾空白后不能为空）
pub fn require_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!(
            "Missing required field: {field}"
        )));
    }
    Ok(())
}

/// 必填列表字段校验
pub fn require_non_empty_list<T>(field: &str, values: &[T]) -> AppResult<()> {
    if values.is_empty() {
        return Err(AppError::ValidationError(format!(
            "Missing required field: {field}"
        )));
    }
    Ok(())
}

/// 解析 YYYY-MM-DD 日期
pub fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::ValidationError(format!("Invalid {field} format, expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("name", "Mega").is_ok());
        assert!(require_non_empty("name", "   ").is_err());
        assert!(require_non_empty("name", "").is_err());
    }

    #[test]
    fn test_require_non_empty_list() {
        assert!(require_non_empty_list("casino_ids", &["c1"]).is_ok());
        assert!(require_non_empty_list::<String>("casino_ids", &[]).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("install_date", "2024-09-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
        );
        assert!(parse_date("install_date", "01/09/2024").is_err());
    }
}
