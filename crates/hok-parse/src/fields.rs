//! Small typed extractors shared by the section parsers.
//!
//! Every extractor returns `None` when its pattern is absent or malformed;
//! callers keep their defaults in that case.

use hok_state::Position;
use regex::Regex;
use std::sync::LazyLock;

static COORDINATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"坐标\s*[（(]\s*([-0-9.]+)\s*[，,]\s*([-0-9.]+)\s*[）)]").expect("coordinate pattern")
});

static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)分([0-9]+)秒").expect("clock pattern"));

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit pattern"));

/// Convert an integer percentage run (`"40"`) into a fraction clamped to `0.0..=1.0`
pub fn percent(digits: &str) -> Option<f64> {
    let value: u32 = digits.parse().ok()?;
    Some(f64::from(value.min(100)) / 100.0)
}

/// Capture group 1 of `re` interpreted as a percentage
pub fn percent_match(re: &Regex, text: &str) -> Option<f64> {
    percent(re.captures(text)?.get(1)?.as_str())
}

/// Capture group 1 of `re` interpreted as an unsigned integer
pub fn number_match(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// First `坐标（x，y）` phrase in `text`
pub fn coordinate(text: &str) -> Option<Position> {
    let caps = COORDINATE.captures(text)?;
    let x = caps.get(1)?.as_str().parse().ok()?;
    let y = caps.get(2)?.as_str().parse().ok()?;
    Some(Position::new(x, y))
}

/// Parse a literal `(x, y)` / `（x，y）` pair
pub fn coordinate_pair(x: &str, y: &str) -> Option<Position> {
    Some(Position::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// `13分4秒` → `13:04`
pub fn clock(text: &str) -> Option<String> {
    let caps = CLOCK.captures(text)?;
    let minutes: u32 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: u32 = caps.get(2)?.as_str().parse().ok()?;
    Some(format!("{}:{:02}", minutes, seconds))
}

/// First run of digits after the first colon (full-width or ASCII)
pub fn number_after_colon(text: &str) -> Option<u32> {
    let idx = text.find(['：', ':'])?;
    let tail = &text[idx..];
    DIGITS.find(tail)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent("40"), Some(0.4));
        assert_eq!(percent("0"), Some(0.0));
        assert_eq!(percent("250"), Some(1.0));
        assert_eq!(percent("4.5"), None);
        assert_eq!(percent(""), None);
    }

    #[test]
    fn test_coordinate_variants() {
        assert_eq!(
            coordinate("坐标（-30.0，10.0），剩余"),
            Some(Position::new(-30.0, 10.0))
        );
        assert_eq!(
            coordinate("坐标(12.5, -3)"),
            Some(Position::new(12.5, -3.0))
        );
        assert_eq!(coordinate("坐标（--，1）"), None);
        assert_eq!(coordinate("没有位置"), None);
    }

    #[test]
    fn test_clock() {
        assert_eq!(clock("游戏阶段：中期，13分4秒").as_deref(), Some("13:04"));
        assert_eq!(clock("0分59秒").as_deref(), Some("0:59"));
        assert_eq!(clock("13分"), None);
    }

    #[test]
    fn test_number_after_colon() {
        assert_eq!(number_after_colon("我方人头数：5"), Some(5));
        assert_eq!(number_after_colon("敌方总经济: 约 31200 金"), Some(31200));
        assert_eq!(number_after_colon("我方人头数5"), None);
        assert_eq!(number_after_colon("敌方人头数：未知"), None);
    }
}
