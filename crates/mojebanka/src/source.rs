//! Чтение файла выписки и декодирование из исходной кодировки.
//!
//! MojeBanka отдаёт текстовый экспорт в Windows-1250; разбор работает уже
//! с декодированной строкой.

use std::{fs, path::Path};

use crate::error::{ParseError, ParseResult};

/// Кодировка входного файла.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Windows-1250, кодировка экспорта MojeBanka.
    #[default]
    Cp1250,
    /// UTF-8 (например, файл уже перекодирован).
    Utf8,
}

impl Encoding {
    fn codec(self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Cp1250 => encoding_rs::WINDOWS_1250,
            Self::Utf8 => encoding_rs::UTF_8,
        }
    }

    /// Имя кодировки для сообщений.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.codec().name()
    }
}

/// Декодирует байты выписки в строку.
///
/// BOM, если он есть, отбрасывается. Байты, которые нельзя декодировать,
/// дают [`ParseError::InvalidEncoding`] вместо подстановки символов замены.
///
/// ```
/// use mojebanka::source::{Encoding, decode_statement};
///
/// // "Úhrada" в Windows-1250
/// let bytes = b"\xDAhrada";
/// assert_eq!(decode_statement(bytes, Encoding::Cp1250).unwrap(), "Úhrada");
/// assert!(decode_statement(bytes, Encoding::Utf8).is_err());
/// ```
pub fn decode_statement(bytes: &[u8], encoding: Encoding) -> ParseResult<String> {
    let (text, had_errors) = encoding.codec().decode_with_bom_removal(bytes);
    if had_errors {
        return Err(ParseError::InvalidEncoding { encoding: encoding.name() });
    }
    Ok(text.into_owned())
}

/// Читает файл выписки и декодирует его.
pub fn read_statement(path: impl AsRef<Path>, encoding: Encoding) -> ParseResult<String> {
    let bytes = fs::read(path.as_ref())?;
    decode_statement(&bytes, encoding)
}
