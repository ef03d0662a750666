use crate::codec::apply;
use crate::toggle::flip_toggle;
use crate::{AppState, Effect, Field, Msg, Pager};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted(query) => {
            state.replace_query(&query);
            vec![state.begin_fetch()]
        }
        Msg::RestoreRecentSearches(searches) => {
            state.restore_recent_searches(searches);
            Vec::new()
        }
        Msg::SearchSubmitted(raw) => {
            let recorded = state.record_search(&raw);
            let changed = state.edit_criteria(|criteria| {
                criteria.set(Field::Search, &raw);
            });
            let mut effects = Vec::with_capacity(2);
            if changed || recorded {
                effects.push(Effect::PersistSession(state.snapshot()));
            }
            if changed {
                effects.push(state.begin_fetch());
            }
            effects
        }
        Msg::FilterChanged { field, value } => {
            let changed = state.edit_criteria(|criteria| {
                criteria.set(field, &value);
            });
            refetch_if(&mut state, changed)
        }
        Msg::FilterCleared(field) => {
            let changed = state.edit_criteria(|criteria| criteria.reset(field));
            refetch_if(&mut state, changed)
        }
        Msg::ToggleClicked(toggle) => {
            let changed = state.edit_criteria(|criteria| flip_toggle(criteria, toggle));
            refetch_if(&mut state, changed)
        }
        Msg::FiltersReset => {
            let changed = state.edit_criteria(|criteria| criteria.reset_filters());
            refetch_if(&mut state, changed)
        }
        Msg::FilterSheetOpened => {
            if state.set_sheet_open(true) {
                vec![Effect::LoadPreferences]
            } else {
                Vec::new()
            }
        }
        Msg::FilterSheetClosed => {
            state.set_sheet_open(false);
            Vec::new()
        }
        Msg::PreferencesLoaded(patch) => {
            let changed = state.edit_criteria(|criteria| {
                apply(criteria, &patch);
            });
            refetch_if(&mut state, changed)
        }
        Msg::SaveFiltersClicked => {
            if state.is_sheet_open() && state.begin_save() {
                vec![Effect::SavePreferences {
                    criteria: state.criteria(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::PreferencesSaved(result) => {
            state.finish_save(result);
            Vec::new()
        }
        Msg::SaveErrorDismissed => {
            state.dismiss_save_error();
            Vec::new()
        }
        Msg::JobsLoaded {
            request_id,
            outcome,
        } => {
            // A superseded response is dropped silently.
            state.apply_loaded(request_id, outcome);
            Vec::new()
        }
        Msg::JobOpened(job_id) => {
            state.mark_viewed(job_id);
            Vec::new()
        }
        Msg::JobDismissed(job_id) => {
            if state.dismiss(job_id) {
                vec![Effect::DismissJob { job_id }]
            } else {
                Vec::new()
            }
        }
        Msg::NextPage => {
            state.turn_page(Pager::next);
            Vec::new()
        }
        Msg::PrevPage => {
            state.turn_page(Pager::prev);
            Vec::new()
        }
        Msg::PageRequested(page) => {
            state.turn_page(|pager, count| pager.go_to(page, count));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Every criteria change is written through and answered with a new fetch.
fn refetch_if(state: &mut AppState, changed: bool) -> Vec<Effect> {
    if !changed {
        return Vec::new();
    }
    vec![Effect::PersistSession(state.snapshot()), state.begin_fetch()]
}
