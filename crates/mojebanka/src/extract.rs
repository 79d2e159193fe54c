//! Извлечение полей транзакции из одного блока выписки.
//!
//! Блок записи выглядит так:
//!
//! ```text
//! 94-60576642/8060     8205868823     -1500,00 CZK     08.09.2011
//! Úhrada   0   08.09.2011
//! 000-08092011 005-005-001596020   0   08.09.2011
//! Popis příkazce STAVEBNI SPORENI - BURINKA
//! Popis pro příjemce NA   AC-0000940060576642
//! Systémový popis Úhrada do jiné banky
//! Zpráva pro příjemce ...
//! ```
//!
//! Первые три строки разбираются каждая своим якорным шаблоном. Дальше
//! идут описания, которые опознаются по меткам в начале строки; строка без
//! метки продолжает текущее описание (перенос длинного текста). Сообщение
//! для получателя ищется по всему блоку отдельно.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{
    error::{ParseError, ParseResult},
    normalize::{TRIM_CHARS, normalize_description, normalize_text, parse_amount, parse_date},
    transaction::{Transaction, TransactionType},
};

/// Метка сообщения для получателя; всё после неё — `desc4`.
pub const MESSAGE_MARKER: &str = "Zpráva pro příjemce";

/// Метки описаний в том порядке, в котором они обязаны идти.
pub const DESCRIPTION_LABELS: [&str; 3] = ["Popis příkazce", "Popis pro příjemce", "Systémový popis"];

/// Счёт, вариабильный символ, сумма, дата.
static AMOUNT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<account>(?:\d+-)?\d*/\d{4})[ \t]+",
        r"(?:(?P<var_sym>\d+)[ \t]+)?",
        r"(?P<price>[+-]?\d+,\d{2} [A-Z]{3})[ \t]+",
        r"(?P<date1>\d{2}\.\d{2}\.\d{4})$"
    ))
    .expect("valid regex")
});

/// Вид операции, константный символ, дата.
static KIND_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<kind>Úhrada|Inkaso)?[ \t]*",
        r"(?P<const_sym>\d+)[ \t]+",
        r"(?P<date2>\d{2}\.\d{2}\.\d{4})$"
    ))
    .expect("valid regex")
});

/// Идентификатор транзакции, специфический символ, дата.
///
/// Идентификатор сам может содержать пробелы, поэтому два последних
/// токена строки всегда считаются символом и датой. Дата обязана иметь
/// вид `D.M.Y`, но длина частей не проверяется: укороченное значение
/// (`08.09.11`) обнуляется при нормализации, а строка без даты не
/// совпадает вовсе.
static ID_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<trans_id>\d[0-9A-Z -]{14,31}?)[ \t]+",
        r"(?P<spec_sym>\d+)[ \t]+",
        r"(?P<date3>\d{1,2}\.\d{1,2}\.\d{2,4})$"
    ))
    .expect("valid regex")
});

/// Разбирает один блок выписки в [`Transaction`].
///
/// Блок должен быть уже отобран как кандидат в транзакции (см.
/// [`crate::classify::is_noise`]). Любое структурное несоответствие
/// возвращает [`ParseError::MalformedTransaction`] с обрезанным текстом блока.
pub fn extract_transaction(block: &str) -> ParseResult<Transaction> {
    let block = block.trim_matches(TRIM_CHARS);
    let mut lines = block.lines();

    let amount = match_line(block, lines.next(), &AMOUNT_LINE, "account/amount line")?;
    let kind = match_line(block, lines.next(), &KIND_LINE, "type/constant symbol line")?;
    let id = match_line(block, lines.next(), &ID_LINE, "transaction id line")?;

    let price = parse_amount(&amount["price"])
        .map_err(|e| ParseError::malformed(block, e.to_string()))?;
    let tx_type: TransactionType = kind
        .name("kind")
        .map_or("", |m| m.as_str())
        .parse()
        .map_err(|e: ParseError| ParseError::malformed(block, e.to_string()))?;

    let [desc1, desc2, desc3] = scan_descriptions(block, lines)?;

    Ok(Transaction {
        account: normalize_text(&amount["account"]),
        var_symbol: amount.name("var_sym").map_or_else(String::new, |m| normalize_text(m.as_str())),
        price,
        date1: parse_date(&amount["date1"]),
        kind: tx_type,
        const_symbol: normalize_text(&kind["const_sym"]),
        date2: parse_date(&kind["date2"]),
        transaction_id: normalize_text(&id["trans_id"]),
        spec_symbol: normalize_text(&id["spec_sym"]),
        date3: parse_date(&id["date3"]),
        desc1,
        desc2,
        desc3,
        desc4: message_for_recipient(block),
    })
}

/// Возвращает текст после [`MESSAGE_MARKER`] с переводами строк и
/// табуляциями, заменёнными пробелами; пустую строку, если метки нет.
///
/// ```
/// use mojebanka::extract::message_for_recipient;
///
/// assert_eq!(message_for_recipient("x\nZpráva pro příjemce  nájem\r\n  září"), "nájem září");
/// assert_eq!(message_for_recipient("bez zprávy"), "");
/// ```
#[must_use]
pub fn message_for_recipient(block: &str) -> String {
    match block.find(MESSAGE_MARKER) {
        Some(start) => {
            let rest = &block[start + MESSAGE_MARKER.len()..];
            normalize_description(&rest.replace(['\n', '\r', '\t'], " "))
        }
        None => String::new(),
    }
}

fn match_line<'a>(
    block: &str,
    line: Option<&'a str>,
    pattern: &Regex,
    what: &str,
) -> ParseResult<Captures<'a>> {
    let line = line.ok_or_else(|| ParseError::malformed(block, format!("missing {what}")))?;
    pattern
        .captures(line.trim_matches(TRIM_CHARS))
        .ok_or_else(|| ParseError::malformed(block, format!("{what} does not match")))
}

/// Собирает три описания по меткам. Текст после [`MESSAGE_MARKER`]
/// в системное описание не входит.
fn scan_descriptions<'a>(
    block: &str,
    lines: impl Iterator<Item = &'a str>,
) -> ParseResult<[String; 3]> {
    let mut sections: [Vec<&str>; 3] = Default::default();
    // Индекс последней открытой метки
    let mut current: Option<usize> = None;

    for line in lines {
        let line = line.trim_matches(TRIM_CHARS);
        let label = DESCRIPTION_LABELS.iter().position(|label| line.starts_with(label));

        // Сообщение обрывает только системное описание; в первых двух
        // описаниях метка остаётся частью текста.
        let (line, message_starts) = match line.find(MESSAGE_MARKER) {
            Some(pos) if label.or(current) == Some(DESCRIPTION_LABELS.len() - 1) => {
                (line[..pos].trim_matches(TRIM_CHARS), true)
            }
            _ => (line, false),
        };

        if !line.is_empty() {
            match label {
                Some(idx) => {
                    let expected = current.map_or(0, |c| c + 1);
                    if idx != expected {
                        return Err(ParseError::malformed(
                            block,
                            format!("'{}' is out of order", DESCRIPTION_LABELS[idx]),
                        ));
                    }
                    sections[idx].push(&line[DESCRIPTION_LABELS[idx].len()..]);
                    current = Some(idx);
                }
                None => match current {
                    Some(idx) => sections[idx].push(line),
                    None => {
                        return Err(ParseError::malformed(
                            block,
                            format!("text before '{}'", DESCRIPTION_LABELS[0]),
                        ));
                    }
                },
            }
        }

        if message_starts {
            break;
        }
    }

    let opened = current.map_or(0, |c| c + 1);
    if let Some(missing) = DESCRIPTION_LABELS.get(opened) {
        return Err(ParseError::malformed(block, format!("missing '{missing}'")));
    }

    Ok(sections.map(|parts| normalize_description(&parts.join(" "))))
}
