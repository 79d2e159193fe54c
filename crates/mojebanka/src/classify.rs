//! Отбраковка служебных блоков выписки (заголовки, итоги, шапки колонок).

/// Фразы из шапки и подвала отчёта. Сравнение с учётом регистра,
/// внутренние серии пробелов — часть фразы.
pub const NOISE_MARKERS: [&str; 5] = [
    "ČÍSLO ÚČTU : ",
    "Obrat na vrub",
    "Číslo protiúčtu                VS",
    "Transakční historie",
    "Za období      od",
];

/// Возвращает `true`, если блок — служебный текст, а не транзакция.
///
/// Пустой (только пробельные символы) блок тоже считается шумом.
///
/// ```
/// use mojebanka::classify::is_noise;
///
/// assert!(is_noise("  \r\n "));
/// assert!(is_noise("KB\nTransakční historie\nstrana 1"));
/// assert!(!is_noise("94-60576642/8060     8205868823     -1500,00 CZK     08.09.2011"));
/// ```
#[must_use]
pub fn is_noise(block: &str) -> bool {
    if block.trim().is_empty() {
        return true;
    }
    NOISE_MARKERS.iter().any(|marker| block.contains(marker))
}
