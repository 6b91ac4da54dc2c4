use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month with first-of-month semantics. Parsing normalizes to
/// year/month only, so no timezone or day component can shift the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BillingMonth {
    year: i32,
    month: u32,
}

impl BillingMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Parse a loosely-formatted billing-month label.
    ///
    /// Tries, in order: exact `YYYY-M[M]`, month-name + 4-digit year
    /// ("Mar 2024", "September 2024", "sept 2024"), then a generic date
    /// parse that appends day 1 when the string lacks one. Returns None
    /// for anything unparsable.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Self::parse_iso(trimmed)
            .or_else(|| Self::parse_named(trimmed))
            .or_else(|| Self::parse_generic(trimmed))
    }

    /// `YYYY-M` or `YYYY-MM`, both parts strictly numeric.
    fn parse_iso(s: &str) -> Option<Self> {
        let (year_part, month_part) = s.split_once('-')?;
        if year_part.len() != 4
            || month_part.is_empty()
            || month_part.len() > 2
            || !year_part.bytes().all(|b| b.is_ascii_digit())
            || !month_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        Self::new(year_part.parse().ok()?, month_part.parse().ok()?)
    }

    /// Month name (3-letter or full, any case, "sept" included) combined
    /// with a 4-digit year, in either token order.
    fn parse_named(s: &str) -> Option<Self> {
        let mut month = None;
        let mut year = None;
        for token in s.split(|c: char| c.is_whitespace() || c == ',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if month.is_none() {
                if let Some(m) = month_from_name(token) {
                    month = Some(m);
                    continue;
                }
            }
            if year.is_none() && token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()) {
                year = Some(token.parse().ok()?);
            }
        }
        Self::new(year?, month?)
    }

    /// Last resort: common full-date formats, with day "1" appended for
    /// strings that carry no day component.
    fn parse_generic(s: &str) -> Option<Self> {
        const FULL_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
        const DAYLESS_FORMATS: &[&str] = &["%Y/%m %d", "%m/%Y %d", "%B %Y %d", "%b %Y %d"];

        for format in FULL_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Self::new(date.year(), date.month());
            }
        }
        let with_day = format!("{s} 1");
        for format in DAYLESS_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&with_day, format) {
                return Self::new(date.year(), date.month());
            }
        }
        None
    }

    /// Canonical zero-padded `YYYY-MM` form.
    pub fn format(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Calendar arithmetic with year rollover; negative offsets allowed.
    pub fn add_months(&self, n: i32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + n;
        Self {
            year: total.div_euclid(12),
            month: total.rem_euclid(12) as u32 + 1,
        }
    }
}

fn month_from_name(token: &str) -> Option<u32> {
    let name = token.to_ascii_lowercase();
    let month = match name.as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso() {
        assert_eq!(
            BillingMonth::parse(Some("2024-03")),
            BillingMonth::new(2024, 3)
        );
        assert_eq!(
            BillingMonth::parse(Some("2024-3")),
            BillingMonth::new(2024, 3)
        );
        assert_eq!(BillingMonth::parse(Some("2024-13")), None);
        assert_eq!(BillingMonth::parse(Some("2024-0")), None);
        assert_eq!(BillingMonth::parse(Some("24-03")), None);
    }

    #[test]
    fn test_parse_month_names() {
        assert_eq!(
            BillingMonth::parse(Some("March 2024")),
            BillingMonth::parse(Some("2024-03"))
        );
        assert_eq!(
            BillingMonth::parse(Some("Sep 2025")),
            BillingMonth::new(2025, 9)
        );
        assert_eq!(
            BillingMonth::parse(Some("sept 2025")),
            BillingMonth::new(2025, 9)
        );
        assert_eq!(
            BillingMonth::parse(Some("SEPTEMBER 2025")),
            BillingMonth::new(2025, 9)
        );
        assert_eq!(
            BillingMonth::parse(Some("2024 December")),
            BillingMonth::new(2024, 12)
        );
    }

    #[test]
    fn test_parse_generic_fallback() {
        assert_eq!(
            BillingMonth::parse(Some("2024-03-15")),
            BillingMonth::new(2024, 3)
        );
        assert_eq!(
            BillingMonth::parse(Some("2024/07")),
            BillingMonth::new(2024, 7)
        );
    }

    #[test]
    fn test_parse_unparsable() {
        assert_eq!(BillingMonth::parse(None), None);
        assert_eq!(BillingMonth::parse(Some("")), None);
        assert_eq!(BillingMonth::parse(Some("   ")), None);
        assert_eq!(BillingMonth::parse(Some("not a month")), None);
        assert_eq!(BillingMonth::parse(Some("Smarch 2024")), None);
    }

    #[test]
    fn test_format_round_trip() {
        let month = BillingMonth::parse(Some("2024-03")).unwrap();
        assert_eq!(month.format(), "2024-03");
        assert_eq!(BillingMonth::parse(Some(&month.format())), Some(month));
    }

    #[test]
    fn test_add_months_rollover() {
        let nov = BillingMonth::new(2024, 11).unwrap();
        assert_eq!(nov.add_months(1), BillingMonth::new(2024, 12).unwrap());
        assert_eq!(nov.add_months(2), BillingMonth::new(2025, 1).unwrap());
        assert_eq!(nov.add_months(14), BillingMonth::new(2026, 1).unwrap());
        assert_eq!(nov.add_months(-11), BillingMonth::new(2023, 12).unwrap());
    }

    #[test]
    fn test_ordering() {
        let a = BillingMonth::new(2023, 12).unwrap();
        let b = BillingMonth::new(2024, 1).unwrap();
        assert!(a < b);
    }
}
