//! Survey records collected from standard users.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Gender choices offered by the survey form.
///
/// Labels are stored verbatim in the survey spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    /// `Male`
    Male,
    /// `Female`
    Female,
    /// `Others`
    Others,
}

impl Gender {
    /// All choices in form order.
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Others];

    /// Spreadsheet and wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Others => "Others",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = SurveyValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| SurveyValidationError::UnknownGender {
                value: s.to_owned(),
            })
    }
}

/// Longest name a spreadsheet cell can hold, in characters.
pub const MAX_NAME_CHARS: usize = 32_767;

/// Reasons a survey submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyValidationError {
    /// Name was missing or blank.
    #[error("name must not be empty")]
    EmptyName,
    /// Name does not fit in one spreadsheet cell.
    #[error("name must be at most {max} characters; got {length}")]
    NameTooLong {
        /// Characters received.
        length: usize,
        /// Largest accepted length.
        max: usize,
    },
    /// No gender was selected.
    #[error("gender must be selected")]
    MissingGender,
    /// Gender label is not one of the offered choices.
    #[error("unknown gender '{value}'; expected Male, Female or Others")]
    UnknownGender {
        /// Label as received.
        value: String,
    },
}

impl SurveyValidationError {
    /// Name of the offending form field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::MissingGender | Self::UnknownGender { .. } => "gender",
        }
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::MissingGender => "missing_gender",
            Self::UnknownGender { .. } => "unknown_gender",
        }
    }
}

/// One anonymous survey row.
///
/// ## Invariants
/// - `name` is not blank, holds at most [`MAX_NAME_CHARS`] characters and is
///   kept exactly as submitted.
///
/// # Examples
/// ```
/// use survey_backend::domain::{Gender, SurveyRecord};
///
/// let record = SurveyRecord::try_from_parts(" Carol ", Some("Female")).unwrap();
/// assert_eq!(record.name(), " Carol ");
/// assert_eq!(record.gender(), Gender::Female);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyRecord {
    #[schema(example = "Carol")]
    name: String,
    gender: Gender,
}

impl SurveyRecord {
    /// Build a record from a typed gender.
    pub fn new(name: &str, gender: Gender) -> Result<Self, SurveyValidationError> {
        if name.trim().is_empty() {
            return Err(SurveyValidationError::EmptyName);
        }
        let length = name.chars().count();
        if length > MAX_NAME_CHARS {
            return Err(SurveyValidationError::NameTooLong {
                length,
                max: MAX_NAME_CHARS,
            });
        }
        Ok(Self {
            name: name.to_owned(),
            gender,
        })
    }

    /// Build a record from raw form values.
    ///
    /// An absent or blank gender counts as unset.
    pub fn try_from_parts(name: &str, gender: Option<&str>) -> Result<Self, SurveyValidationError> {
        if name.trim().is_empty() {
            return Err(SurveyValidationError::EmptyName);
        }
        let parsed = match gender {
            Some(label) if !label.trim().is_empty() => label.parse::<Gender>()?,
            _ => return Err(SurveyValidationError::MissingGender),
        };
        Self::new(name, parsed)
    }

    /// Respondent name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Selected gender.
    pub fn gender(&self) -> Gender {
        self.gender
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Some("Male"), SurveyValidationError::EmptyName)]
    #[case("   ", Some("Male"), SurveyValidationError::EmptyName)]
    #[case("Alice", None, SurveyValidationError::MissingGender)]
    #[case("Alice", Some(""), SurveyValidationError::MissingGender)]
    #[case("Alice", Some("  "), SurveyValidationError::MissingGender)]
    #[case("Alice", Some("male"), SurveyValidationError::UnknownGender { value: "male".to_owned() })]
    #[case("Alice", Some(" Male "), SurveyValidationError::UnknownGender { value: " Male ".to_owned() })]
    fn invalid_submissions_are_rejected(
        #[case] name: &str,
        #[case] gender: Option<&str>,
        #[case] expected: SurveyValidationError,
    ) {
        let err = SurveyRecord::try_from_parts(name, gender).expect_err("must be rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("Male", Gender::Male)]
    #[case("Female", Gender::Female)]
    #[case("Others", Gender::Others)]
    fn labels_parse_to_gender(#[case] label: &str, #[case] expected: Gender) {
        assert_eq!(label.parse::<Gender>().expect("known label"), expected);
        assert_eq!(expected.to_string(), label);
    }

    #[rstest]
    #[case("  Carol  ")]
    #[case("Carol\n")]
    #[case("x\u{1}y")]
    fn names_are_kept_verbatim(#[case] name: &str) {
        let record = SurveyRecord::try_from_parts(name, Some("Female")).expect("valid record");
        assert_eq!(record.name(), name);
    }

    #[rstest]
    fn longest_cell_sized_name_is_accepted() {
        let name = "é".repeat(MAX_NAME_CHARS);
        let record = SurveyRecord::new(&name, Gender::Male).expect("fits one cell");
        assert_eq!(record.name().chars().count(), MAX_NAME_CHARS);
    }

    #[rstest]
    fn oversized_name_is_rejected() {
        let name = "a".repeat(40_000);

        let err = SurveyRecord::new(&name, Gender::Male).expect_err("too long for one cell");

        assert_eq!(
            err,
            SurveyValidationError::NameTooLong {
                length: 40_000,
                max: MAX_NAME_CHARS
            }
        );
        assert_eq!(err.field(), "name");
        assert_eq!(err.code(), "name_too_long");
    }

    #[rstest]
    fn validation_errors_name_their_field() {
        assert_eq!(SurveyValidationError::EmptyName.field(), "name");
        assert_eq!(SurveyValidationError::MissingGender.field(), "gender");
        assert_eq!(SurveyValidationError::MissingGender.code(), "missing_gender");
    }

    #[rstest]
    fn record_serialises_gender_label() {
        let record = SurveyRecord::new("Carol", Gender::Female).expect("valid record");
        let value = serde_json::to_value(record).expect("serialise record");
        assert_eq!(value, serde_json::json!({ "name": "Carol", "gender": "Female" }));
    }
}
