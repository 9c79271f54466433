//! Composer client: HTTP transport, endpoint resolution and flow drivers
//! for the post-generation backend.
mod admin;
mod auth;
mod config;
mod dto;
mod generate;
mod planner;
mod posts;
mod resolve;
mod schedule;
mod transport;

pub use admin::{AdminClient, AdminError, AdminStats, CountBlock, PostRecord, UserRecord};
pub use auth::AuthContext;
pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use generate::{FlowEvent, Generator, NullProgressSink, ProgressSink};
pub use planner::{IdeaMode, IdeaRequest, PlannerClient, PlannerError, PlannerIdea};
pub use posts::{PostsClient, PostsError};
pub use resolve::{
    resolve, CandidateList, DebugSink, NullDebugSink, ResolveError, RingDebugSink,
};
pub use schedule::{
    ScheduleRequest, ScheduleStatus, ScheduledPost, SchedulerClient, SchedulerError,
};
pub use transport::{
    ApiReply, ApiRequest, ApiTransport, Method, ReqwestTransport, TransportError,
};
