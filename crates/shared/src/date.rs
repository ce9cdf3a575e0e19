use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: impl AsRef<str>) -> crate::Result<Date> {
    Ok(Date::parse(value.as_ref().trim(), DATE_FORMAT)?)
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_and_format() {
        let day = parse_date(" 2024-06-01 ").unwrap();
        assert_eq!(day, date!(2024 - 06 - 01));
        assert_eq!(format_date(day), "2024-06-01");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("06/01/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }
}
