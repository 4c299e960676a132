//! Доменная модель: запись о звонке, тип абонента и разбор полей из строк.

use crate::error::{CallsError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Формат даты в журнале и в пользовательском вводе.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SubscriberType {
    Regular,
    Business,
    #[serde(rename = "VIP")]
    Vip,
}

impl SubscriberType {
    pub const ALL: [SubscriberType; 3] = [Self::Regular, Self::Business, Self::Vip];

    /// Каноническое имя, которое пишется в журнал.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Business => "Business",
            Self::Vip => "VIP",
        }
    }

    /// Разбор без учёта регистра: для ввода пользователя ("vip", "business").
    /// Журнал читается строго через `FromStr`.
    pub fn parse_lenient(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| unknown_subscriber_type(s))
    }
}

impl FromStr for SubscriberType {
    type Err = CallsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| unknown_subscriber_type(s))
    }
}

impl fmt::Display for SubscriberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn unknown_subscriber_type(s: &str) -> CallsError {
    CallsError::Parse(format!(
        "subscriber type {s:?}: expected one of Regular, Business, VIP"
    ))
}

/// Одна запись о звонке. После создания не меняется.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRecord {
    pub full_name: String,
    pub phone_number: String,
    pub call_date: NaiveDate,
    /// Тариф за минуту.
    pub rate: Decimal,
    pub duration_minutes: u32,
    /// Скидка в процентах, ожидается 0..=100.
    pub discount_percent: Decimal,
    pub subscriber_type: SubscriberType,
}

/// Семь полей записи в том виде, как их ввёл пользователь.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFields<'a> {
    pub full_name: &'a str,
    pub phone_number: &'a str,
    pub call_date: &'a str,
    pub rate: &'a str,
    pub duration_minutes: &'a str,
    pub discount_percent: &'a str,
    pub subscriber_type: &'a str,
}

impl CallRecord {
    pub fn new(
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        call_date: NaiveDate,
        rate: Decimal,
        duration_minutes: u32,
        discount_percent: Decimal,
        subscriber_type: SubscriberType,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            call_date,
            rate,
            duration_minutes,
            discount_percent,
            subscriber_type,
        }
    }

    /// Собирает запись из пользовательского ввода. Тип абонента — без учёта регистра.
    pub fn from_fields(raw: &RawFields<'_>) -> Result<Self> {
        let r = Self::new(
            raw.full_name,
            raw.phone_number,
            parse_date(raw.call_date)?,
            parse_decimal("rate", raw.rate)?,
            parse_minutes(raw.duration_minutes)?,
            parse_decimal("discount", raw.discount_percent)?,
            SubscriberType::parse_lenient(raw.subscriber_type)?,
        );
        r.validate()?;
        Ok(r)
    }

    /// Запись должна пережить журнал: в текстовых полях нет `;` и переводов строк,
    /// стоимость считается без переполнения.
    pub fn validate(&self) -> Result<()> {
        check_text("full name", &self.full_name)?;
        check_text("phone", &self.phone_number)?;
        if self.cost().is_none() {
            return Err(CallsError::Parse(format!(
                "cost overflows: rate {} x {} min",
                self.rate, self.duration_minutes
            )));
        }
        Ok(())
    }

    /// rate * duration * (1 - discount / 100), без округления.
    /// `None` при переполнении `Decimal`.
    pub fn cost(&self) -> Option<Decimal> {
        let share = self.discount_percent.checked_div(Decimal::ONE_HUNDRED)?;
        let factor = Decimal::ONE.checked_sub(share)?;
        self.rate
            .checked_mul(Decimal::from(self.duration_minutes))?
            .checked_mul(factor)
    }

    pub fn display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cost = match self.cost() {
            Some(c) => format!(
                "{:.2}",
                c.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            ),
            None => "переповнення".to_string(),
        };
        write!(
            f,
            "{} | {} | {} | {} грн/хв | {} хв | Знижка: {}% | Вартість: {} грн | Тип: {}",
            self.full_name,
            self.phone_number,
            self.call_date.format(DATE_FORMAT),
            self.rate,
            self.duration_minutes,
            self.discount_percent,
            cost,
            self.subscriber_type,
        )
    }
}

fn check_text(field: &str, s: &str) -> Result<()> {
    if s.contains([';', '\r', '\n']) {
        return Err(CallsError::Parse(format!(
            "{field} {s:?}: must not contain ';' or line breaks"
        )));
    }
    Ok(())
}

/// Дата `yyyy-mm-dd`; время, если оно указано, отбрасывается.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let err = match NaiveDate::parse_from_str(s, DATE_FORMAT) {
        Ok(d) => return Ok(d),
        Err(e) => e,
    };
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| CallsError::Parse(format!("date {s:?}: {err}")))
}

/// Десятичное число; запятая принимается как разделитель дробной части.
pub fn parse_decimal(field: &str, s: &str) -> Result<Decimal> {
    let s = s.trim().replace(',', ".");
    s.parse::<Decimal>()
        .map_err(|e| CallsError::Parse(format!("{field} {s:?}: {e}")))
}

pub fn parse_minutes(s: &str) -> Result<u32> {
    let s = s.trim();
    s.parse::<u32>()
        .map_err(|e| CallsError::Parse(format!("duration {s:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rate: &str, minutes: u32, discount: &str) -> CallRecord {
        CallRecord::new(
            "Ivan Petrov",
            "+380501234567",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Decimal::from_str_exact(rate).unwrap(),
            minutes,
            Decimal::from_str_exact(discount).unwrap(),
            SubscriberType::Regular,
        )
    }

    #[test]
    fn cost_applies_discount() {
        assert_eq!(record("10", 30, "10").cost(), Some(Decimal::new(270, 0)));
        assert_eq!(record("2.5", 4, "0").cost(), Some(Decimal::new(10, 0)));
        assert_eq!(record("2.5", 4, "100").cost(), Some(Decimal::ZERO));
    }

    #[test]
    fn overflowing_cost_is_rejected_not_panicking() {
        let r = record("79228162514264337593543950335", 2, "0");
        assert_eq!(r.cost(), None);
        assert!(r.display_string().contains("Вартість: переповнення грн"));
        assert!(matches!(r.validate(), Err(CallsError::Parse(_))));

        let raw = RawFields {
            full_name: "Ivan",
            phone_number: "1",
            call_date: "2024-03-01",
            rate: "79228162514264337593543950335",
            duration_minutes: "2",
            discount_percent: "0",
            subscriber_type: "Regular",
        };
        match CallRecord::from_fields(&raw) {
            Err(CallsError::Parse(msg)) => assert!(msg.starts_with("cost overflows"), "{msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn separators_in_text_fields_are_rejected() {
        let ok = RawFields {
            full_name: "Petrov Ivan",
            phone_number: "123",
            call_date: "2024-03-01",
            rate: "1",
            duration_minutes: "1",
            discount_percent: "0",
            subscriber_type: "Regular",
        };
        assert!(CallRecord::from_fields(&ok).is_ok());
        for raw in [
            RawFields { full_name: "Petrov; Ivan", ..ok },
            RawFields { full_name: "Petrov\nIvan", ..ok },
            RawFields { phone_number: "12;3", ..ok },
            RawFields { phone_number: "123\r", ..ok },
        ] {
            assert!(matches!(CallRecord::from_fields(&raw), Err(CallsError::Parse(_))), "{raw:?}");
        }
    }

    #[test]
    fn display_rounds_cost_only() {
        let r = record("0.333", 1, "0");
        let s = r.display_string();
        assert!(s.contains("0.333 грн/хв"), "{s}");
        assert!(s.contains("Вартість: 0.33 грн"), "{s}");
        assert!(s.ends_with("Тип: Regular"), "{s}");

        let s = record("10", 30, "10").to_string();
        assert_eq!(
            s,
            "Ivan Petrov | +380501234567 | 2024-03-01 | 10 грн/хв | 30 хв | Знижка: 10% | Вартість: 270.00 грн | Тип: Regular"
        );
    }

    #[test]
    fn subscriber_type_strict_and_lenient() {
        assert_eq!("VIP".parse::<SubscriberType>().unwrap(), SubscriberType::Vip);
        assert!("vip".parse::<SubscriberType>().is_err());
        assert!("Gold".parse::<SubscriberType>().is_err());

        assert_eq!(SubscriberType::parse_lenient("vip").unwrap(), SubscriberType::Vip);
        assert_eq!(
            SubscriberType::parse_lenient(" BUSINESS ").unwrap(),
            SubscriberType::Business
        );
        assert_eq!(SubscriberType::Vip.to_string(), "VIP");
    }

    #[test]
    fn date_ignores_time_of_day() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date("2024-03-01").unwrap(), d);
        assert_eq!(parse_date(" 2024-03-01 23:59:59 ").unwrap(), d);
        assert_eq!(parse_date("2024-03-01T08:15").unwrap(), d);
        assert!(matches!(parse_date("01.03.2024"), Err(CallsError::Parse(_))));
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn from_fields_parses_user_input() {
        let raw = RawFields {
            full_name: "Olena Ivanova",
            phone_number: "123",
            call_date: "2024-03-01",
            rate: "1,5",
            duration_minutes: "10",
            discount_percent: "0",
            subscriber_type: "business",
        };
        let r = CallRecord::from_fields(&raw).unwrap();
        assert_eq!(r.rate, Decimal::new(15, 1));
        assert_eq!(r.subscriber_type, SubscriberType::Business);
        assert_eq!(r.cost(), Some(Decimal::new(15, 0)));

        let bad = RawFields { duration_minutes: "ten", ..raw };
        match CallRecord::from_fields(&bad) {
            Err(CallsError::Parse(msg)) => assert!(msg.starts_with("duration"), "{msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(CallRecord::from_fields(&RawFields { duration_minutes: "-5", ..raw }).is_err());
    }
}
