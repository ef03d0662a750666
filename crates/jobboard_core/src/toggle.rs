use crate::{Criteria, DatePosted, ExperienceLevel};

/// Coarse switches shown in the quick-toggle bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Jobs,
    EasyApply,
    DatePosted,
    ExperienceLevel,
}

impl Toggle {
    pub const ALL: [Toggle; 4] = [
        Toggle::Jobs,
        Toggle::EasyApply,
        Toggle::DatePosted,
        Toggle::ExperienceLevel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Toggle::Jobs => "Jobs",
            Toggle::EasyApply => "Easy Apply",
            Toggle::DatePosted => "Date Posted",
            Toggle::ExperienceLevel => "Experience",
        }
    }
}

/// On/off state of the bar, always derived from [`Criteria`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleView {
    pub jobs: bool,
    pub easy_apply: bool,
    pub date_posted: bool,
    pub experience_level: bool,
}

impl ToggleView {
    pub fn from_criteria(criteria: &Criteria) -> Self {
        Self {
            jobs: criteria.has_filters(),
            easy_apply: criteria.easy_apply,
            date_posted: criteria.date_posted != DatePosted::Anytime,
            experience_level: criteria.experience_level.is_some(),
        }
    }

    pub fn is_on(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Jobs => self.jobs,
            Toggle::EasyApply => self.easy_apply,
            Toggle::DatePosted => self.date_posted,
            Toggle::ExperienceLevel => self.experience_level,
        }
    }
}

/// Pushes a switch change down into the detailed criteria.
///
/// Switching on only fills a field still at its sentinel, so a value picked in
/// the criteria sheet survives. Switching `Jobs` off clears every filter but
/// keeps the search text.
pub fn apply_toggle(criteria: &mut Criteria, toggle: Toggle, on: bool) {
    match (toggle, on) {
        (Toggle::Jobs, true) => {
            if !criteria.has_filters() {
                criteria.easy_apply = true;
            }
        }
        (Toggle::Jobs, false) => criteria.reset_filters(),
        (Toggle::EasyApply, on) => criteria.easy_apply = on,
        (Toggle::DatePosted, true) => {
            if criteria.date_posted == DatePosted::Anytime {
                criteria.date_posted = DatePosted::PastWeek;
            }
        }
        (Toggle::DatePosted, false) => criteria.date_posted = DatePosted::Anytime,
        (Toggle::ExperienceLevel, true) => {
            criteria
                .experience_level
                .get_or_insert(ExperienceLevel::Entry);
        }
        (Toggle::ExperienceLevel, false) => criteria.experience_level = None,
    }
}

/// Flips `toggle` relative to its current derived state.
pub fn flip_toggle(criteria: &mut Criteria, toggle: Toggle) {
    let on = ToggleView::from_criteria(criteria).is_on(toggle);
    apply_toggle(criteria, toggle, !on);
}
