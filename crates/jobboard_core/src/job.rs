use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub type JobId = u64;

/// A closed set of values that travel as human-readable labels ("Full-time",
/// "Past week", ...). Parsing ignores case, spaces and punctuation so that
/// "On-site", "onsite" and "ONSITE" all resolve to the same variant.
pub trait Label: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn from_label(raw: &str) -> Option<Self> {
        let wanted = fold_label(raw);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|value| fold_label(value.label()) == wanted)
    }
}

pub(crate) fn fold_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkMode {
    Remote,
    Onsite,
    Hybrid,
}

impl Label for WorkMode {
    const ALL: &'static [Self] = &[Self::Remote, Self::Onsite, Self::Hybrid];

    fn label(self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Onsite => "Onsite",
            Self::Hybrid => "Hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl Label for EmploymentType {
    const ALL: &'static [Self] = &[
        Self::FullTime,
        Self::PartTime,
        Self::Contract,
        Self::Internship,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

impl Label for ExperienceLevel {
    const ALL: &'static [Self] = &[Self::Entry, Self::Mid, Self::Senior];

    fn label(self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Mid => "Mid",
            Self::Senior => "Senior",
        }
    }
}

macro_rules! label_impls {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str($crate::Label::label(*self))
                }
            }

            impl ::serde::Serialize for $ty {
                fn serialize<S: ::serde::Serializer>(
                    &self,
                    serializer: S,
                ) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str($crate::Label::label(*self))
                }
            }
        )*
    };
}

label_impls!(WorkMode, EmploymentType, ExperienceLevel);
pub(crate) use label_impls;

/// A single job posting as delivered by the jobs service or the bundled dataset.
///
/// Everything except `viewed` is fixed once loaded. Optional attributes are
/// `None` when the service omits them or sends a value this crate does not
/// recognise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub posted_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub easy_apply: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub actively_reviewing: bool,
    #[serde(default)]
    pub viewed: bool,
    #[serde(default)]
    pub early_applicant: bool,
    #[serde(default)]
    pub promoted: bool,
    #[serde(default)]
    pub applicants: Option<u32>,
    #[serde(default)]
    pub in_your_network: bool,
    #[serde(default, deserialize_with = "lenient_label")]
    pub remote: Option<WorkMode>,
    #[serde(default, alias = "type", deserialize_with = "lenient_label")]
    pub employment_type: Option<EmploymentType>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub experience_level: Option<ExperienceLevel>,
}

impl Job {
    /// A job with the given identity fields and every attribute unset.
    pub fn new(
        id: JobId,
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            company: company.into(),
            location: location.into(),
            posted_time: None,
            easy_apply: false,
            verified: false,
            actively_reviewing: false,
            viewed: false,
            early_applicant: false,
            promoted: false,
            applicants: None,
            in_your_network: false,
            remote: None,
            employment_type: None,
            experience_level: None,
        }
    }
}

fn lenient_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Label,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(T::from_label))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|text| {
        DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|stamp| stamp.with_timezone(&Utc))
    }))
}
