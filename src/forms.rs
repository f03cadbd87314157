use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

/// Field-level validation messages, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<(String, String)>);

impl FormErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, msg)| msg.as_str())
    }
}

impl From<validator::ValidationErrors> for FormErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = Self::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("invalid value ({})", error.code));
                out.push(field.to_string(), message);
            }
        }
        out
    }
}

/// A form plus whatever errors its last submission produced. Detail pages
/// start from the default state; a failed POST re-renders with both filled.
#[derive(Debug, Clone, Default)]
pub struct FormState<T> {
    pub values: T,
    pub errors: FormErrors,
}

impl<T> FormState<T> {
    pub fn failed(values: T, errors: FormErrors) -> Self {
        Self { values, errors }
    }
}

/// Raw rating submission, exactly as posted. Nothing is written until
/// [`RatingForm::parse`] succeeds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub viewed_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingValues {
    pub rating: Decimal,
    pub viewed_date: NaiveDate,
}

impl RatingForm {
    /// Validates and parses the submission; an omitted date falls back to
    /// `today`.
    pub fn parse(&self, today: NaiveDate) -> Result<RatingValues, FormErrors> {
        let mut errors = FormErrors::default();

        let rating = match self.rating.trim() {
            "" => {
                errors.push("rating", "a rating is required");
                None
            }
            raw => match raw.parse::<Decimal>() {
                Ok(value) => match check_rating(value) {
                    Ok(()) => Some(value),
                    Err(message) => {
                        errors.push("rating", message);
                        None
                    }
                },
                Err(_) => {
                    errors.push("rating", "enter a number between 0 and 10");
                    None
                }
            },
        };

        let viewed_date = match self.viewed_date.trim() {
            "" => Some(today),
            raw => match raw.parse::<NaiveDate>() {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push("viewed_date", "enter a date as YYYY-MM-DD");
                    None
                }
            },
        };

        match (rating, viewed_date) {
            (Some(rating), Some(viewed_date)) if errors.is_empty() => Ok(RatingValues {
                rating,
                viewed_date,
            }),
            _ => Err(errors),
        }
    }
}

/// Shared with the operator console's IMDB checks: 0 to 10 inclusive, at
/// most one fractional digit.
pub fn check_rating(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO || value > Decimal::from(10) {
        return Err("rating must be between 0 and 10");
    }
    if value.scale() > 1 {
        return Err("rating allows at most one decimal place");
    }
    Ok(())
}

/// Feedback submission contract. Every field is required; the email is
/// stored for moderation and never rendered publicly.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FeedbackForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 20, message = "name must be 1 to 20 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 60, message = "surname must be 1 to 60 characters"))]
    pub surname: String,
    #[serde(default)]
    #[validate(email(message = "enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "feedback must be 1 to 5000 characters"))]
    pub feed: String,
}

impl FeedbackForm {
    /// Whitespace-trimmed copy; validation and storage both work on this.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            email: self.email.trim().to_string(),
            feed: self.feed.trim().to_string(),
        }
    }

    pub fn check(&self) -> Result<(), FormErrors> {
        self.validate().map_err(FormErrors::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        let form = RatingForm {
            rating: "10.0".into(),
            viewed_date: String::new(),
        };
        let values = form.parse(today()).unwrap();
        assert_eq!(values.rating, Decimal::from(10));

        let form = RatingForm {
            rating: "0".into(),
            viewed_date: String::new(),
        };
        assert!(form.parse(today()).is_ok());
    }

    #[test]
    fn out_of_range_ratings_are_rejected() {
        for raw in ["10.1", "-0.1", "11", "-5"] {
            let form = RatingForm {
                rating: raw.into(),
                viewed_date: String::new(),
            };
            let errors = form.parse(today()).unwrap_err();
            assert_eq!(errors.field("rating"), Some("rating must be between 0 and 10"));
        }
    }

    #[test]
    fn more_than_one_decimal_place_is_rejected() {
        let form = RatingForm {
            rating: "7.55".into(),
            viewed_date: String::new(),
        };
        let errors = form.parse(today()).unwrap_err();
        assert_eq!(
            errors.field("rating"),
            Some("rating allows at most one decimal place")
        );
    }

    #[test]
    fn non_numeric_rating_is_rejected() {
        let form = RatingForm {
            rating: "great".into(),
            viewed_date: String::new(),
        };
        let errors = form.parse(today()).unwrap_err();
        assert!(errors.field("rating").is_some());
    }

    #[test]
    fn omitted_date_defaults_to_today() {
        let form = RatingForm {
            rating: "7.5".into(),
            viewed_date: "  ".into(),
        };
        let values = form.parse(today()).unwrap();
        assert_eq!(values.viewed_date, today());
    }

    #[test]
    fn explicit_date_is_kept() {
        let form = RatingForm {
            rating: "7.5".into(),
            viewed_date: "2024-03-01".into(),
        };
        let values = form.parse(today()).unwrap();
        assert_eq!(
            values.viewed_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn malformed_date_is_rejected() {
        let form = RatingForm {
            rating: "7.5".into(),
            viewed_date: "03/01/2024".into(),
        };
        let errors = form.parse(today()).unwrap_err();
        assert!(errors.field("viewed_date").is_some());
    }

    #[test]
    fn both_errors_are_collected() {
        let form = RatingForm {
            rating: "eleven".into(),
            viewed_date: "soon".into(),
        };
        let errors = form.parse(today()).unwrap_err();
        assert!(errors.field("rating").is_some());
        assert!(errors.field("viewed_date").is_some());
    }

    #[test]
    fn feedback_requires_every_field() {
        let form = FeedbackForm::default();
        let errors = form.check().unwrap_err();
        for field in ["name", "surname", "email", "feed"] {
            assert!(errors.field(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn feedback_rejects_bad_email() {
        let form = FeedbackForm {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            email: "not-an-email".into(),
            feed: "Loved it".into(),
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors.field("email"), Some("enter a valid email address"));
    }

    #[test]
    fn feedback_normalization_trims_whitespace() {
        let form = FeedbackForm {
            name: "  Ada ".into(),
            surname: " Lovelace".into(),
            email: " ada@example.com ".into(),
            feed: " Loved it ".into(),
        };
        let normalized = form.normalized();
        assert_eq!(normalized.name, "Ada");
        assert_eq!(normalized.email, "ada@example.com");
        assert!(normalized.check().is_ok());
    }

    #[test]
    fn whitespace_only_fields_fail_after_normalization() {
        let form = FeedbackForm {
            name: "   ".into(),
            surname: "Lovelace".into(),
            email: "ada@example.com".into(),
            feed: "Loved it".into(),
        };
        let errors = form.normalized().check().unwrap_err();
        assert!(errors.field("name").is_some());
    }

    #[test]
    fn over_long_feedback_name_is_rejected() {
        let form = FeedbackForm {
            name: "a".repeat(21),
            surname: "Lovelace".into(),
            email: "ada@example.com".into(),
            feed: "Loved it".into(),
        };
        let errors = form.check().unwrap_err();
        assert!(errors.field("name").is_some());
    }
}
