use jobboard_core::{
    apply_toggle, encode, flip_toggle, Criteria, DatePosted, ExperienceLevel, Field, Toggle,
    ToggleView,
};

#[test]
fn default_criteria_show_every_switch_off() {
    assert_eq!(
        ToggleView::from_criteria(&Criteria::default()),
        ToggleView::default()
    );
}

#[test]
fn switching_on_fills_only_unset_fields() {
    let mut criteria = Criteria::default();
    apply_toggle(&mut criteria, Toggle::DatePosted, true);
    assert_eq!(criteria.date_posted, DatePosted::PastWeek);

    criteria.set(Field::DatePosted, "Past 24 hours");
    criteria.set(Field::ExperienceLevel, "Senior");
    apply_toggle(&mut criteria, Toggle::DatePosted, true);
    apply_toggle(&mut criteria, Toggle::ExperienceLevel, true);
    assert_eq!(criteria.date_posted, DatePosted::Past24Hours);
    assert_eq!(criteria.experience_level, Some(ExperienceLevel::Senior));
}

#[test]
fn every_switch_has_an_observable_effect() {
    for toggle in Toggle::ALL {
        let mut criteria = Criteria::default();
        flip_toggle(&mut criteria, toggle);
        let view = ToggleView::from_criteria(&criteria);
        assert!(view.is_on(toggle), "{} stayed off", toggle.label());
        assert!(!encode(&criteria).is_empty());

        flip_toggle(&mut criteria, toggle);
        assert!(criteria.is_default(), "{} did not switch off", toggle.label());
    }
}

#[test]
fn jobs_switch_off_clears_every_filter_but_keeps_search() {
    let mut criteria = Criteria::default();
    criteria.set(Field::Search, "designer");
    criteria.set(Field::DatePosted, "Past week");
    criteria.set(Field::Remote, "Remote");
    criteria.set(Field::InYourNetwork, "true");
    assert!(ToggleView::from_criteria(&criteria).jobs);

    apply_toggle(&mut criteria, Toggle::Jobs, false);

    assert_eq!(criteria.date_posted, DatePosted::Anytime);
    assert!(!criteria.has_filters());
    assert_eq!(criteria.search, "designer");
    let encoded = encode(&criteria);
    assert!(!encoded.contains_key("datePosted"));
    assert_eq!(encoded.len(), 1);
}

#[test]
fn jobs_switch_on_keeps_existing_filters() {
    let mut criteria = Criteria::default();
    criteria.set(Field::Company, "Tech Corp");
    apply_toggle(&mut criteria, Toggle::Jobs, true);
    assert!(!criteria.easy_apply);
    assert_eq!(criteria.company.as_deref(), Some("Tech Corp"));
}

#[test]
fn view_follows_edits_made_in_the_sheet() {
    let mut criteria = Criteria::default();
    criteria.set(Field::EasyApply, "true");
    criteria.set(Field::ExperienceLevel, "Mid");

    let view = ToggleView::from_criteria(&criteria);
    assert!(view.jobs && view.easy_apply && view.experience_level);
    assert!(!view.date_posted);
}
