use crate::domain::model::{BirthQuery, Field, FormFields, Gender, Violation};
use chrono::{Datelike, NaiveDate};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2030;

/// 數值欄位的解析結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parsed {
    Empty,
    Invalid,
    Value(i32),
}

fn parse_number(raw: &str) -> Parsed {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Parsed::Empty;
    }
    trimmed.parse::<i32>().map_or(Parsed::Invalid, Parsed::Value)
}

impl Parsed {
    fn value(self) -> Option<i32> {
        match self {
            Parsed::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl BirthQuery {
    /// 從表單欄位建立查詢並組出 `YYYY-MM-DD HH:MM:SS` 時間字串
    pub fn from_fields(fields: &FormFields) -> Self {
        let year = parse_number(&fields.year).value();
        let month = parse_number(&fields.month).value();
        let day = parse_number(&fields.day).value();
        let hour = parse_number(&fields.hour).value();
        let minute = parse_number(&fields.minute).value();
        let second = parse_number(&fields.second).value();

        let birth_datetime = format!(
            "{}-{}-{} {}:{}:{}",
            component(year, &fields.year, 0),
            component(month, &fields.month, 2),
            component(day, &fields.day, 2),
            component(hour, &fields.hour, 2),
            component(minute, &fields.minute, 2),
            component(second, &fields.second, 2),
        );

        Self {
            name: fields.name.trim().to_string(),
            gender: Gender::parse(&fields.gender),
            gender_input: fields.gender.trim().to_string(),
            birth_place: fields.birth_place.trim().to_string(),
            year,
            month,
            day,
            hour,
            minute,
            second,
            birth_datetime,
        }
    }
}

fn component(parsed: Option<i32>, raw: &str, width: usize) -> String {
    match parsed {
        Some(v) => format!("{:0width$}", v, width = width),
        None => format!("{:0>width$}", raw.trim(), width = width),
    }
}

/// 累積所有違規項目，而非在第一個錯誤就停下
pub fn validate(query: &BirthQuery) -> Vec<Violation> {
    let mut violations = Vec::new();

    if query.name.trim().is_empty() {
        violations.push(Violation::Required(Field::Name));
    }
    match (&query.gender, query.gender_input.trim()) {
        (Some(_), _) => {}
        (None, "") => violations.push(Violation::Required(Field::Gender)),
        (None, other) => violations.push(Violation::UnknownGender(other.to_string())),
    }
    if query.birth_place.trim().is_empty() {
        violations.push(Violation::Required(Field::BirthPlace));
    }

    check_range(&mut violations, Field::Year, query.year, MIN_YEAR, MAX_YEAR);
    check_range(&mut violations, Field::Month, query.month, 1, 12);
    check_range(&mut violations, Field::Day, query.day, 1, 31);
    check_range(&mut violations, Field::Hour, query.hour, 0, 23);
    check_range(&mut violations, Field::Minute, query.minute, 0, 59);
    check_range(&mut violations, Field::Second, query.second, 0, 59);

    if let (Some(y), Some(m), Some(d)) = (query.year, query.month, query.day) {
        if !is_existing_date(y, m, d) {
            violations.push(Violation::NonexistentDate);
        }
    }

    violations
}

/// 驗證時需要區分「未填」與「非數字」，因此重新檢查原始輸入
pub fn validate_fields(fields: &FormFields) -> (BirthQuery, Vec<Violation>) {
    let query = BirthQuery::from_fields(fields);
    let mut violations = validate(&query);

    let raw = [
        (Field::Year, &fields.year),
        (Field::Month, &fields.month),
        (Field::Day, &fields.day),
        (Field::Hour, &fields.hour),
        (Field::Minute, &fields.minute),
        (Field::Second, &fields.second),
    ];
    for violation in violations.iter_mut() {
        if let Violation::NotANumber(field) = violation {
            let field = *field;
            if let Some((_, value)) = raw.iter().find(|(f, _)| *f == field) {
                if parse_number(value) == Parsed::Empty {
                    *violation = Violation::Required(field);
                }
            }
        }
    }

    (query, violations)
}

fn check_range(violations: &mut Vec<Violation>, field: Field, value: Option<i32>, min: i32, max: i32) {
    match value {
        None => violations.push(Violation::NotANumber(field)),
        Some(v) if v < min || v > max => violations.push(Violation::OutOfRange(field)),
        Some(_) => {}
    }
}

/// 由年月日重建日期後必須得到相同的年月日
pub fn is_existing_date(year: i32, month: i32, day: i32) -> bool {
    let (Ok(m), Ok(d)) = (u32::try_from(month), u32::try_from(day)) else {
        return false;
    };
    NaiveDate::from_ymd_opt(year, m, d)
        .map(|date| date.year() == year && date.month() == m && date.day() == d)
        .unwrap_or(false)
}

pub fn days_in_month(year: i32, month: i32) -> Option<u32> {
    let month = u32::try_from(month).ok().filter(|m| (1..=12).contains(m))?;
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_of_next.pred_opt().map(|last| last.day())
}

/// 年月有效時，把超出當月天數的日期壓回月底
pub fn clamp_day(year: i32, month: i32, day: i32) -> i32 {
    match days_in_month(year, month) {
        Some(max) if day > max as i32 => max as i32,
        _ => day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(year: &str, month: &str, day: &str, hour: &str, minute: &str, second: &str) -> FormFields {
        FormFields {
            name: "张三".to_string(),
            gender: "male".to_string(),
            birth_place: "北京".to_string(),
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
            hour: hour.to_string(),
            minute: minute.to_string(),
            second: second.to_string(),
        }
    }

    #[test]
    fn test_birth_datetime_is_zero_padded() {
        let query = BirthQuery::from_fields(&fields("1990", "5", "15", "10", "30", "0"));
        assert_eq!(query.birth_datetime, "1990-05-15 10:30:00");
        assert_eq!(query.month, Some(5));
        assert_eq!(query.gender, Some(Gender::Male));
    }

    #[test]
    fn test_valid_query_has_no_violations() {
        let query = BirthQuery::from_fields(&fields("1990", "05", "15", "10", "30", "00"));
        assert!(validate(&query).is_empty());
    }

    #[test]
    fn test_leap_day() {
        let leap = BirthQuery::from_fields(&fields("2024", "2", "29", "0", "0", "0"));
        assert!(validate(&leap).is_empty());

        let common = BirthQuery::from_fields(&fields("2023", "2", "29", "0", "0", "0"));
        assert_eq!(validate(&common), vec![Violation::NonexistentDate]);
    }

    #[test]
    fn test_day_beyond_month_length_is_rejected() {
        for (y, m, d) in [("2023", "4", "31"), ("2023", "6", "31"), ("1900", "2", "29"), ("2023", "11", "31")] {
            let query = BirthQuery::from_fields(&fields(y, m, d, "12", "0", "0"));
            assert!(
                validate(&query).contains(&Violation::NonexistentDate),
                "{}-{}-{} should not exist",
                y,
                m,
                d
            );
        }
    }

    #[test]
    fn test_all_time_violations_reported_together() {
        let query = BirthQuery::from_fields(&fields("1990", "5", "15", "24", "60", "-1"));
        let violations = validate(&query);
        assert_eq!(
            violations,
            vec![
                Violation::OutOfRange(Field::Hour),
                Violation::OutOfRange(Field::Minute),
                Violation::OutOfRange(Field::Second),
            ]
        );
    }

    #[test]
    fn test_required_fields_and_ranges_accumulate() {
        let mut form = fields("1899", "13", "0", "1", "1", "1");
        form.name = "   ".to_string();
        form.gender = String::new();
        form.birth_place = String::new();
        let violations = validate(&BirthQuery::from_fields(&form));

        assert!(violations.contains(&Violation::Required(Field::Name)));
        assert!(violations.contains(&Violation::Required(Field::Gender)));
        assert!(violations.contains(&Violation::Required(Field::BirthPlace)));
        assert!(violations.contains(&Violation::OutOfRange(Field::Year)));
        assert!(violations.contains(&Violation::OutOfRange(Field::Month)));
        assert!(violations.contains(&Violation::OutOfRange(Field::Day)));
        assert!(violations.contains(&Violation::NonexistentDate));
    }

    #[test]
    fn test_non_numeric_fields_are_explicit_violations() {
        let (_, violations) = validate_fields(&fields("1990", "5", "15", "abc", "", "7.5"));
        assert_eq!(
            violations,
            vec![
                Violation::NotANumber(Field::Hour),
                Violation::Required(Field::Minute),
                Violation::NotANumber(Field::Second),
            ]
        );
    }

    #[test]
    fn test_unknown_gender() {
        let mut form = fields("1990", "5", "15", "1", "1", "1");
        form.gender = "robot".to_string();
        assert_eq!(
            validate(&BirthQuery::from_fields(&form)),
            vec![Violation::UnknownGender("robot".to_string())]
        );
    }

    #[test]
    fn test_days_in_month_and_clamp() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2023, 12), Some(31));
        assert_eq!(days_in_month(2023, 13), None);

        assert_eq!(clamp_day(2023, 4, 31), 30);
        assert_eq!(clamp_day(2023, 4, 12), 12);
        assert_eq!(clamp_day(2023, 0, 40), 40);
    }

    #[test]
    fn test_days_in_month_at_year_limit() {
        assert_eq!(days_in_month(i32::MAX, 12), None);
        assert_eq!(clamp_day(i32::MAX, 12, 40), 40);
        assert_eq!(days_in_month(i32::MIN, 1), None);
    }
}
