//! Job board core: criteria model, codec, evaluator, and the pure state machine.
pub mod codec;
mod criteria;
mod effect;
mod evaluate;
mod job;
mod msg;
mod pager;
mod state;
mod toggle;
mod update;
mod view_model;

pub use codec::{decode, encode, QueryParams};
pub use criteria::{Criteria, DatePosted, Field, FieldValue, SortBy, ANY};
pub use effect::Effect;
pub use evaluate::evaluate;
pub use job::{EmploymentType, ExperienceLevel, Job, JobId, Label, WorkMode};
pub use msg::Msg;
pub use pager::{Pager, DEFAULT_PAGE_SIZE};
pub use state::{
    AppState, JobsOrigin, JobsOutcome, RequestId, SessionSnapshot, RECENT_SEARCH_LIMIT,
};
pub use toggle::{apply_toggle, flip_toggle, Toggle, ToggleView};
pub use update::update;
pub use view_model::{AppViewModel, JobRowView};
