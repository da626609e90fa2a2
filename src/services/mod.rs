pub mod clock;
pub mod session_service;
pub mod submission_service;

pub use clock::SessionClock;
pub use session_service::{
    ConflictResolution, LifecycleState, SessionEngine, StartOutcome, SubmitTrigger,
};
pub use submission_service::SubmissionService;
