//! Нормализация полей: обрезка пробелов, схлопывание пробелов в описаниях,
//! разбор дат и сумм.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::warn;

use crate::{
    error::{ParseError, ParseResult},
    transaction::{Price, Sign},
};

/// Символы, которые срезаются по краям любого поля.
pub(crate) const TRIM_CHARS: &[char] = &[' ', '\t', '\r', '\n'];

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").expect("valid regex"));

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<sign>[+-]?)(?P<whole>\d+),(?P<cents>\d{2}) (?P<currency>[A-Z]{3})$")
        .expect("valid regex")
});

/// Срезает пробелы, табуляции и переводы строк по краям.
///
/// ```
/// use mojebanka::normalize::normalize_text;
/// assert_eq!(normalize_text(" \t0\r\n"), "0");
/// assert_eq!(normalize_text(""), "");
/// ```
#[must_use]
pub fn normalize_text(s: &str) -> String {
    s.trim_matches(TRIM_CHARS).to_string()
}

/// Нормализует описание: обрезка краёв и замена серий из 2+ пробелов одним.
///
/// Повторное применение ничего не меняет.
///
/// ```
/// use mojebanka::normalize::normalize_description;
/// assert_eq!(normalize_description("  NA   AC-0000940060576642 "), "NA AC-0000940060576642");
/// ```
#[must_use]
pub fn normalize_description(s: &str) -> String {
    SPACE_RUN.replace_all(s.trim_matches(TRIM_CHARS), " ").into_owned()
}

/// Разбирает дату вида `DD.MM.YYYY`.
///
/// Строка другой длины (пустая, обрезанная) даёт `None`. Строка правильной
/// длины с несуществующей датой (`31.02.2020`) тоже даёт `None`, с
/// предупреждением в лог: даты вторичны по отношению к сумме и счёту.
///
/// ```
/// use chrono::NaiveDate;
/// use mojebanka::normalize::parse_date;
///
/// assert_eq!(parse_date("08.09.2011"), NaiveDate::from_ymd_opt(2011, 9, 8));
/// assert_eq!(parse_date("08.09.11"), None);
/// assert_eq!(parse_date(""), None);
/// ```
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim_matches(TRIM_CHARS);
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let digits_ok = [0, 1, 3, 4, 6, 7, 8, 9].iter().all(|&i| bytes[i].is_ascii_digit());
    if !digits_ok || bytes[2] != b'.' || bytes[5] != b'.' {
        warn!(value = s, "date is not in DD.MM.YYYY form");
        return None;
    }

    // Все позиции проверены выше, срезы состоят только из ASCII-цифр
    let day: u32 = s[0..2].parse().ok()?;
    let month: u32 = s[3..5].parse().ok()?;
    let year: i32 = s[6..10].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day);
    if date.is_none() {
        warn!(value = s, "calendar-invalid date, field left empty");
    }
    date
}

/// Разбирает сумму вида `[+|-]1500,00 CZK`.
///
/// Знак, целая и дробная часть и валюта сохраняются по отдельности.
pub fn parse_amount(s: &str) -> ParseResult<Price> {
    let s = s.trim_matches(TRIM_CHARS);
    let invalid = || ParseError::InvalidValue {
        field: "price".to_string(),
        expected: "[+|-]<digits>,<2 digits> <currency>".to_string(),
        actual: s.to_string(),
    };

    let caps = AMOUNT.captures(s).ok_or_else(invalid)?;

    let sign = match &caps["sign"] {
        "-" => Sign::Minus,
        "+" => Sign::Plus,
        _ => Sign::Unsigned,
    };
    let whole: u64 = caps["whole"].parse().map_err(|_| invalid())?;
    if whole > Price::MAX_WHOLE {
        return Err(invalid());
    }
    let cents: u8 = caps["cents"].parse().map_err(|_| invalid())?;

    Ok(Price { sign, whole, cents, currency: caps["currency"].to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_strips_all_edge_whitespace() {
        assert_eq!(normalize_text("\r\n\t  STAVEBNI SPORENI  \t\n"), "STAVEBNI SPORENI");
    }

    #[test]
    fn test_normalize_text_keeps_inner_runs() {
        assert_eq!(normalize_text("NA   AC"), "NA   AC");
    }

    #[test]
    fn test_normalize_description_is_idempotent() {
        let samples = ["", "   ", "NA   AC-0000940060576642", " a  b   c    d ", "Úhrada do jiné banky"];
        for s in samples {
            let once = normalize_description(s);
            assert_eq!(normalize_description(&once), once, "input: {s:?}");
        }
    }

    #[test]
    fn test_normalize_description_keeps_single_tabs() {
        assert_eq!(normalize_description("a\tb  c"), "a\tb c");
    }

    #[test]
    fn test_parse_date_valid() {
        assert_eq!(parse_date(" 29.02.2012 "), NaiveDate::from_ymd_opt(2012, 2, 29));
    }

    #[test]
    fn test_parse_date_wrong_length_is_none() {
        assert_eq!(parse_date("8.9.2011"), None);
        assert_eq!(parse_date("08.09.201"), None);
        assert_eq!(parse_date("0"), None);
    }

    #[test]
    fn test_parse_date_calendar_invalid_is_none() {
        assert_eq!(parse_date("31.02.2020"), None);
        assert_eq!(parse_date("00.13.2020"), None);
    }

    #[test]
    fn test_parse_date_rejects_other_separators() {
        assert_eq!(parse_date("08/09/2011"), None);
        assert_eq!(parse_date("8.09.20111"), None);
    }

    #[test]
    fn test_parse_amount_negative() {
        let price = parse_amount("-1500,00 CZK").unwrap();
        assert_eq!(price.sign, Sign::Minus);
        assert_eq!(price.whole, 1500);
        assert_eq!(price.cents, 0);
        assert_eq!(price.currency, "CZK");
    }

    #[test]
    fn test_parse_amount_plus_and_unsigned() {
        assert_eq!(parse_amount("+12,34 CZK").unwrap().sign, Sign::Plus);
        assert_eq!(parse_amount("12,34 EUR").unwrap().sign, Sign::Unsigned);
        assert_eq!(parse_amount("12,34 EUR").unwrap().currency, "EUR");
    }

    #[test]
    fn test_parse_amount_rerender_reproduces_value() {
        for (text, expected) in [
            ("-1500,00 CZK", "-1500.00"),
            ("+0,07 CZK", "0.07"),
            ("987654,32 CZK", "987654.32"),
        ] {
            let price = parse_amount(text).unwrap();
            let units = price.minor_units();
            let sign = if units < 0 { "-" } else { "" };
            let rendered = format!("{sign}{}.{:02}", units.abs() / 100, units.abs() % 100);
            assert_eq!(rendered, expected);
        }
    }

    #[test]
    fn test_parse_amount_rejects_bad_shapes() {
        for bad in ["1500 CZK", "1500,0 CZK", "1500,000 CZK", "1500,00", "1500,00 czk", "1500.00 CZK", ""] {
            assert!(
                matches!(parse_amount(bad), Err(ParseError::InvalidValue { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_amount_rejects_overflow() {
        assert!(parse_amount("99999999999999999999,00 CZK").is_err());
    }
}
