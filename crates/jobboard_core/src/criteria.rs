use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::job::{fold_label, label_impls, EmploymentType, ExperienceLevel, Label, WorkMode};

/// Sentinel spelled out for free-text and enumerated fields that are unset.
pub const ANY: &str = "Any";

const MS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DatePosted {
    #[default]
    Anytime,
    Past24Hours,
    PastWeek,
    PastMonth,
}

impl DatePosted {
    /// Maximum job age in milliseconds, or `None` when no window applies.
    pub fn window_ms(self) -> Option<i64> {
        match self {
            Self::Anytime => None,
            Self::Past24Hours => Some(MS_PER_DAY),
            Self::PastWeek => Some(7 * MS_PER_DAY),
            Self::PastMonth => Some(30 * MS_PER_DAY),
        }
    }
}

impl Label for DatePosted {
    const ALL: &'static [Self] = &[
        Self::Anytime,
        Self::Past24Hours,
        Self::PastWeek,
        Self::PastMonth,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Anytime => "Anytime",
            Self::Past24Hours => "Past 24 hours",
            Self::PastWeek => "Past week",
            Self::PastMonth => "Past month",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortBy {
    #[default]
    MostRelevant,
    MostRecent,
    Salary,
}

impl Label for SortBy {
    const ALL: &'static [Self] = &[Self::MostRelevant, Self::MostRecent, Self::Salary];

    fn label(self) -> &'static str {
        match self {
            Self::MostRelevant => "Most relevant",
            Self::MostRecent => "Most recent",
            Self::Salary => "Salary",
        }
    }
}

label_impls!(DatePosted, SortBy);

/// Every filter dimension, keyed the way it appears in the shareable query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Search,
    DatePosted,
    ExperienceLevel,
    Company,
    JobType,
    Remote,
    EasyApply,
    HasVerifications,
    Location,
    Industry,
    JobFunction,
    Title,
    Under10Applicants,
    InYourNetwork,
    SortBy,
}

impl Field {
    pub const ALL: [Field; 15] = [
        Field::Search,
        Field::DatePosted,
        Field::ExperienceLevel,
        Field::Company,
        Field::JobType,
        Field::Remote,
        Field::EasyApply,
        Field::HasVerifications,
        Field::Location,
        Field::Industry,
        Field::JobFunction,
        Field::Title,
        Field::Under10Applicants,
        Field::InYourNetwork,
        Field::SortBy,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::Search => "search",
            Field::DatePosted => "datePosted",
            Field::ExperienceLevel => "experienceLevel",
            Field::Company => "company",
            Field::JobType => "jobType",
            Field::Remote => "remote",
            Field::EasyApply => "easyApply",
            Field::HasVerifications => "hasVerifications",
            Field::Location => "location",
            Field::Industry => "industry",
            Field::JobFunction => "jobFunction",
            Field::Title => "title",
            Field::Under10Applicants => "under10Applicants",
            Field::InYourNetwork => "inYourNetwork",
            Field::SortBy => "sortBy",
        }
    }

    /// Looks up a field by query key, ignoring ASCII case.
    pub fn from_key(key: &str) -> Option<Field> {
        let key = key.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Current value of one field, with sentinels spelled out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Flag(bool),
    Text(Cow<'a, str>),
}

impl FieldValue<'_> {
    /// The string form used in the addressable representation.
    pub fn to_param(&self) -> String {
        match self {
            FieldValue::Flag(on) => on.to_string(),
            FieldValue::Text(text) => text.to_string(),
        }
    }
}

impl Serialize for FieldValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Flag(on) => serializer.serialize_bool(*on),
            FieldValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

/// The full set of filter values for a session.
///
/// `None` (or the enum's default variant, or `false`) is the sentinel meaning
/// "this predicate is not applied". Values produced by [`Criteria::set`] are
/// normalised so that a sentinel is always stored the same way, which is what
/// makes the codec round-trip exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub search: String,
    pub date_posted: DatePosted,
    pub experience_level: Option<ExperienceLevel>,
    pub company: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub remote: Option<WorkMode>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub job_function: Option<String>,
    pub title: Option<String>,
    pub sort_by: SortBy,
    pub easy_apply: bool,
    pub has_verifications: bool,
    pub under_10_applicants: bool,
    pub in_your_network: bool,
}

impl Criteria {
    pub fn is_default(&self) -> bool {
        *self == Criteria::default()
    }

    /// True when any field other than the free-text search constrains results.
    pub fn has_filters(&self) -> bool {
        Field::ALL
            .into_iter()
            .filter(|field| *field != Field::Search)
            .any(|field| !self.is_unset(field))
    }

    pub fn is_unset(&self, field: Field) -> bool {
        match field {
            Field::Search => self.search.is_empty(),
            Field::DatePosted => self.date_posted == DatePosted::default(),
            Field::ExperienceLevel => self.experience_level.is_none(),
            Field::Company => self.company.is_none(),
            Field::JobType => self.employment_type.is_none(),
            Field::Remote => self.remote.is_none(),
            Field::EasyApply => !self.easy_apply,
            Field::HasVerifications => !self.has_verifications,
            Field::Location => self.location.is_none(),
            Field::Industry => self.industry.is_none(),
            Field::JobFunction => self.job_function.is_none(),
            Field::Title => self.title.is_none(),
            Field::Under10Applicants => !self.under_10_applicants,
            Field::InYourNetwork => !self.in_your_network,
            Field::SortBy => self.sort_by == SortBy::default(),
        }
    }

    pub fn value(&self, field: Field) -> FieldValue<'_> {
        fn choice(value: &Option<String>) -> FieldValue<'_> {
            FieldValue::Text(Cow::Borrowed(value.as_deref().unwrap_or(ANY)))
        }
        fn label<T: Label>(value: Option<T>) -> FieldValue<'static> {
            FieldValue::Text(Cow::Borrowed(value.map_or(ANY, Label::label)))
        }

        match field {
            Field::Search => FieldValue::Text(Cow::Borrowed(&self.search)),
            Field::DatePosted => label(Some(self.date_posted)),
            Field::ExperienceLevel => label(self.experience_level),
            Field::Company => choice(&self.company),
            Field::JobType => label(self.employment_type),
            Field::Remote => label(self.remote),
            Field::EasyApply => FieldValue::Flag(self.easy_apply),
            Field::HasVerifications => FieldValue::Flag(self.has_verifications),
            Field::Location => choice(&self.location),
            Field::Industry => choice(&self.industry),
            Field::JobFunction => choice(&self.job_function),
            Field::Title => choice(&self.title),
            Field::Under10Applicants => FieldValue::Flag(self.under_10_applicants),
            Field::InYourNetwork => FieldValue::Flag(self.in_your_network),
            Field::SortBy => label(Some(self.sort_by)),
        }
    }

    /// Parses `raw` and assigns it to `field`.
    ///
    /// Returns `false` and leaves the field untouched when `raw` is not a
    /// recognisable value for it. Sentinel spellings ("Any", "Anytime",
    /// "false", empty text) reset the field.
    pub fn set(&mut self, field: Field, raw: &str) -> bool {
        let raw = raw.trim();
        match field {
            Field::Search => {
                self.search = raw.to_string();
                true
            }
            Field::DatePosted => {
                if is_any(raw) {
                    self.date_posted = DatePosted::default();
                    return true;
                }
                assign(&mut self.date_posted, DatePosted::from_label(raw))
            }
            Field::SortBy => assign(&mut self.sort_by, SortBy::from_label(raw)),
            Field::ExperienceLevel => assign_optional(&mut self.experience_level, raw),
            Field::JobType => assign_optional(&mut self.employment_type, raw),
            Field::Remote => assign_optional(&mut self.remote, raw),
            Field::Company => assign_choice(&mut self.company, raw),
            Field::Location => assign_choice(&mut self.location, raw),
            Field::Industry => assign_choice(&mut self.industry, raw),
            Field::JobFunction => assign_choice(&mut self.job_function, raw),
            Field::Title => assign_choice(&mut self.title, raw),
            Field::EasyApply => assign(&mut self.easy_apply, parse_flag(raw)),
            Field::HasVerifications => assign(&mut self.has_verifications, parse_flag(raw)),
            Field::Under10Applicants => {
                assign(&mut self.under_10_applicants, parse_flag(raw))
            }
            Field::InYourNetwork => assign(&mut self.in_your_network, parse_flag(raw)),
        }
    }

    pub fn reset(&mut self, field: Field) {
        let defaults = Criteria::default();
        match field {
            Field::Search => self.search = defaults.search,
            Field::DatePosted => self.date_posted = defaults.date_posted,
            Field::ExperienceLevel => self.experience_level = None,
            Field::Company => self.company = None,
            Field::JobType => self.employment_type = None,
            Field::Remote => self.remote = None,
            Field::EasyApply => self.easy_apply = false,
            Field::HasVerifications => self.has_verifications = false,
            Field::Location => self.location = None,
            Field::Industry => self.industry = None,
            Field::JobFunction => self.job_function = None,
            Field::Title => self.title = None,
            Field::Under10Applicants => self.under_10_applicants = false,
            Field::InYourNetwork => self.in_your_network = false,
            Field::SortBy => self.sort_by = defaults.sort_by,
        }
    }

    /// Resets every filter field, keeping the free-text search.
    pub fn reset_filters(&mut self) {
        let search = std::mem::take(&mut self.search);
        *self = Criteria {
            search,
            ..Criteria::default()
        };
    }
}

fn is_any(raw: &str) -> bool {
    raw.is_empty() || fold_label(raw) == "any"
}

fn parse_flag(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

fn assign<T>(slot: &mut T, parsed: Option<T>) -> bool {
    match parsed {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

fn assign_optional<T: Label>(slot: &mut Option<T>, raw: &str) -> bool {
    if is_any(raw) {
        *slot = None;
        return true;
    }
    match T::from_label(raw) {
        Some(value) => {
            *slot = Some(value);
            true
        }
        None => false,
    }
}

fn assign_choice(slot: &mut Option<String>, raw: &str) -> bool {
    *slot = if is_any(raw) {
        None
    } else {
        Some(raw.to_string())
    };
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_spellings_reset_fields() {
        let mut criteria = Criteria::default();
        assert!(criteria.set(Field::Company, "Tech Corp"));
        assert!(criteria.set(Field::Company, " any "));
        assert_eq!(criteria.company, None);

        assert!(criteria.set(Field::DatePosted, "Past week"));
        assert!(criteria.set(Field::DatePosted, "Any time"));
        assert_eq!(criteria.date_posted, DatePosted::Anytime);

        assert!(criteria.set(Field::EasyApply, "true"));
        assert!(criteria.set(Field::EasyApply, "false"));
        assert!(!criteria.easy_apply);
    }

    #[test]
    fn unrecognised_values_leave_field_untouched() {
        let mut criteria = Criteria::default();
        criteria.set(Field::Remote, "Remote");
        assert!(!criteria.set(Field::Remote, "On the moon"));
        assert_eq!(criteria.remote, Some(WorkMode::Remote));
        assert!(!criteria.set(Field::EasyApply, "yes"));
        assert!(!criteria.set(Field::SortBy, "Cheapest"));
    }

    #[test]
    fn has_filters_ignores_search() {
        let mut criteria = Criteria::default();
        criteria.set(Field::Search, "rust");
        assert!(!criteria.has_filters());
        criteria.set(Field::SortBy, "Most recent");
        assert!(criteria.has_filters());
    }
}
