//! 金额工具：系统内部统一使用美分 (i64)，对外以两位小数字符串展示。
//!
//! 请求中的金额既可以是 JSON 数字，也可以是数字字符串（前端历史上两种都会发送）。

use serde::{Deserialize, Deserializer};

/// 金额上限（100 亿，单位：美分）
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000_000_000;

/// 格式化为两位小数，例如 10530 -> "105.30"
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// 解析十进制金额字符串为美分，超过两位的小数四舍五入
pub fn parse_cents(raw: &str) -> Result<i64, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err("amount must not be empty".to_string());
    }
    if s.starts_with('-') {
        return Err("amount must not be negative".to_string());
    }
    let s = s.strip_prefix('+').unwrap_or(s);

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(format!("invalid amount: {raw}"));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(format!("invalid amount: {raw}"));
    }

    let units: i64 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| format!("amount out of range: {raw}"))?
    };

    let mut digits = frac_part.chars().map(|c| c as i64 - '0' as i64);
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().map(|d| d >= 5).unwrap_or(false);

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
        .ok_or_else(|| format!("amount out of range: {raw}"))?;

    check_range(cents)
}

/// 将浮点金额转换为美分（四舍五入到分）
pub fn cents_from_f64(value: f64) -> Result<i64, String> {
    if !value.is_finite() {
        return Err("amount must be a finite number".to_string());
    }
    if value < 0.0 {
        return Err("amount must not be negative".to_string());
    }
    let cents = (value * 100.0).round();
    if cents > MAX_AMOUNT_CENTS as f64 {
        return Err("amount out of range".to_string());
    }
    check_range(cents as i64)
}

fn check_range(cents: i64) -> Result<i64, String> {
    if cents > MAX_AMOUNT_CENTS {
        return Err("amount out of range".to_string());
    }
    Ok(cents)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    fn into_cents(self) -> Result<i64, String> {
        match self {
            AmountInput::Number(n) => cents_from_f64(n),
            AmountInput::Text(s) => parse_cents(&s),
        }
    }
}

/// serde: 数字或字符串 -> 美分
pub fn deserialize_cents<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    AmountInput::deserialize(deserializer)?
        .into_cents()
        .map_err(serde::de::Error::custom)
}

/// serde: 可选金额，配合 `#[serde(default)]` 使用
pub fn deserialize_optional_cents<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AmountInput>::deserialize(deserializer)? {
        Some(input) => input
            .into_cents()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(10530), "105.30");
        assert_eq!(format_cents(-250), "-2.50");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("100").unwrap(), 10000);
        assert_eq!(parse_cents("95.5").unwrap(), 9550);
        assert_eq!(parse_cents(" 12.34 ").unwrap(), 1234);
        assert_eq!(parse_cents(".5").unwrap(), 50);
        assert_eq!(parse_cents("1.005").unwrap(), 101);
        assert_eq!(parse_cents("1.004").unwrap(), 100);
        assert!(parse_cents("-1").is_err());
        assert!(parse_cents("abc").is_err());
        assert!(parse_cents("1.2.3").is_err());
        assert!(parse_cents(".").is_err());
        assert!(parse_cents("").is_err());
        assert!(parse_cents("99999999999999999").is_err());
    }

    #[test]
    fn test_cents_from_f64() {
        assert_eq!(cents_from_f64(15.0).unwrap(), 1500);
        assert_eq!(cents_from_f64(0.1 + 0.2).unwrap(), 30);
        assert!(cents_from_f64(-0.01).is_err());
        assert!(cents_from_f64(f64::NAN).is_err());
        assert!(cents_from_f64(f64::INFINITY).is_err());
    }

    #[derive(Deserialize)]
    struct Body {
        #[serde(deserialize_with = "deserialize_cents")]
        amount: i64,
        #[serde(default, deserialize_with = "deserialize_optional_cents")]
        trigger: Option<i64>,
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let b: Body = serde_json::from_str(r#"{"amount": 15}"#).unwrap();
        assert_eq!(b.amount, 1500);
        assert_eq!(b.trigger, None);

        let b: Body = serde_json::from_str(r#"{"amount": "15.25", "trigger": 100.5}"#).unwrap();
        assert_eq!(b.amount, 1525);
        assert_eq!(b.trigger, Some(10050));

        assert!(serde_json::from_str::<Body>(r#"{"amount": -3}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"amount": "ten"}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{}"#).is_err());
    }
}
