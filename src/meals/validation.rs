use lazy_static::lazy_static;
use regex::Regex;
use time::{Date, Month, Time};

use super::{dto::MealPayload, repo_types::MealInput};
use crate::error::FieldError;

const DATE_MESSAGE: &str = "Invalid date format. Expected YYYY-MM-DD.";
const HOUR_MESSAGE: &str = "Invalid hour format. Expected HH:mm.";

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap();
    static ref HOUR_RE: Regex = Regex::new(r"^([0-1]\d|2[0-3]):([0-5]\d)$").unwrap();
}

/// Checks every field of a meal payload, collecting all failures.
pub fn validate_meal(payload: MealPayload) -> Result<MealInput, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = required(payload.name, "name", &mut errors);
    if matches!(&name, Some(n) if n.trim().is_empty()) {
        errors.push(FieldError::new("name", "Name must not be blank"));
    }
    let description = required(payload.description, "description", &mut errors);

    let date = required(payload.date, "date", &mut errors).and_then(|raw| {
        let parsed = parse_date(&raw);
        if parsed.is_none() {
            errors.push(FieldError::new("date", DATE_MESSAGE));
        }
        parsed
    });

    let hour = required(payload.hour, "hour", &mut errors).and_then(|raw| {
        let parsed = parse_hour(&raw);
        if parsed.is_none() {
            errors.push(FieldError::new("hour", HOUR_MESSAGE));
        }
        parsed
    });

    let is_in_diet = required(payload.is_in_diet, "isInDiet", &mut errors);

    match (name, description, date, hour, is_in_diet) {
        (Some(name), Some(description), Some(date), Some(hour), Some(is_in_diet))
            if errors.is_empty() =>
        {
            Ok(MealInput {
                name,
                description,
                date,
                hour,
                is_in_diet,
            })
        }
        _ => Err(errors),
    }
}

fn required<T>(value: Option<T>, field: &str, errors: &mut Vec<FieldError>) -> Option<T> {
    if value.is_none() {
        errors.push(FieldError::new(field, format!("{} is required", field)));
    }
    value
}

/// `YYYY-MM-DD` that also names a real calendar day.
fn parse_date(raw: &str) -> Option<Date> {
    let caps = DATE_RE.captures(raw)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u8 = caps[2].parse().ok()?;
    let day: u8 = caps[3].parse().ok()?;
    Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()
}

/// `HH:MM`, 24-hour clock.
fn parse_hour(raw: &str) -> Option<Time> {
    let caps = HOUR_RE.captures(raw)?;
    let hour: u8 = caps[1].parse().ok()?;
    let minute: u8 = caps[2].parse().ok()?;
    Time::from_hms(hour, minute, 0).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn payload(date: &str, hour: &str) -> MealPayload {
        MealPayload {
            name: Some("Test Meal".into()),
            description: Some("Test Meal Description".into()),
            date: Some(date.into()),
            hour: Some(hour.into()),
            is_in_diet: Some(true),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn accepts_a_well_formed_meal() {
        let input = validate_meal(payload("2023-01-01", "12:00")).expect("valid");
        assert_eq!(input.date, date!(2023 - 01 - 01));
        assert_eq!(input.hour, time!(12:00));
        assert!(input.is_in_diet);
    }

    #[test]
    fn accepts_hour_bounds() {
        assert!(validate_meal(payload("2024-02-29", "00:00")).is_ok());
        assert!(validate_meal(payload("2024-02-29", "23:59")).is_ok());
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["01-01-2023", "2023/01/01", "2023-1-1", "2023-13-01", "2023-02-30", ""] {
            let errors = validate_meal(payload(bad, "12:00")).unwrap_err();
            assert_eq!(fields(&errors), vec!["date"], "{bad}");
            assert_eq!(errors[0].message, DATE_MESSAGE);
        }
    }

    #[test]
    fn rejects_malformed_hours() {
        for bad in ["24:00", "12:60", "7:30", "12:00:00", "noon"] {
            let errors = validate_meal(payload("2023-01-01", bad)).unwrap_err();
            assert_eq!(fields(&errors), vec!["hour"], "{bad}");
            assert_eq!(errors[0].message, HOUR_MESSAGE);
        }
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = validate_meal(MealPayload::default()).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["name", "description", "date", "hour", "isInDiet"]
        );
    }

    #[test]
    fn rejects_blank_name() {
        let mut p = payload("2023-01-01", "12:00");
        p.name = Some("   ".into());
        let errors = validate_meal(p).unwrap_err();
        assert_eq!(fields(&errors), vec!["name"]);
    }
}
