//! Composer core: pure generation-flow state machine and projection rules.
mod debug_log;
mod effect;
mod failure;
mod msg;
mod project;
mod request;
mod state;
mod update;
mod view_model;

pub use debug_log::{AttemptOutcome, DebugEntry, DebugLog, DEBUG_LOG_CAP};
pub use effect::Effect;
pub use failure::{FailureKind, ValidationError};
pub use msg::{Msg, PollOutcome};
pub use project::{project, GeneratedPost, Projection};
pub use request::{GenerationRequest, Platform};
pub use state::{FlowState, JobId, Phase};
pub use update::update;
pub use view_model::FlowView;
