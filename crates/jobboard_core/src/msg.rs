use crate::{Field, JobId, JobsOutcome, QueryParams, RequestId, Toggle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// First mount: decode the current addressable query.
    Mounted(QueryParams),
    /// Restore recent searches from persisted state.
    RestoreRecentSearches(Vec<String>),
    /// User submitted the search box (empty clears the search).
    SearchSubmitted(String),
    /// User picked a value for one field in the criteria sheet.
    FilterChanged { field: Field, value: String },
    /// User cleared one field back to its default.
    FilterCleared(Field),
    /// User clicked a switch in the quick-toggle bar.
    ToggleClicked(Toggle),
    /// User clicked Reset in the criteria sheet.
    FiltersReset,
    FilterSheetOpened,
    FilterSheetClosed,
    /// Saved preferences arrived; merged over the current criteria.
    PreferencesLoaded(QueryParams),
    SaveFiltersClicked,
    /// Outcome of saving preferences; `Err` carries a user-facing message.
    PreferencesSaved(Result<(), String>),
    SaveErrorDismissed,
    /// Job source finished a fetch (possibly from the fallback dataset).
    JobsLoaded {
        request_id: RequestId,
        outcome: JobsOutcome,
    },
    JobOpened(JobId),
    JobDismissed(JobId),
    NextPage,
    PrevPage,
    PageRequested(usize),
    /// An engine event with nothing to apply.
    NoOp,
}
