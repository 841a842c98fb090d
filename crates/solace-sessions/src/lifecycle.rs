//! The session state machine.
//!
//! ```text
//! active ──(100% answered)──────────► ended-complete ──resume──► resumed
//!   │                                        ▲
//!   ├──end, 100%─────────────────────────────┘
//!   └──end, < 100%──► ended-premature ──resume──► active
//! ```
//!
//! These functions decide transitions only; the controller persists them.

use solace_core::models::question::QuestionSnapshot;
use solace_core::models::session::{Session, SessionStatus};
use solace_instruments::insight::summarize;
use solace_instruments::scoring::Completion;

use crate::error::SessionError;

/// Status after a user ends the session by hand.
pub fn manual_end(status: SessionStatus, completion: u32) -> Result<SessionStatus, SessionError> {
    match status {
        SessionStatus::Active if completion == 100 => Ok(SessionStatus::EndedComplete),
        SessionStatus::Active => Ok(SessionStatus::EndedPremature),
        other => Err(SessionError::InvalidTransition {
            action: "end",
            status: other,
        }),
    }
}

/// Status after a user resumes an ended session.
///
/// An unfinished intake goes back to `active`; a completed one continues in
/// free-talk mode.
pub fn resume(status: SessionStatus, completion: u32) -> Result<SessionStatus, SessionError> {
    match status {
        SessionStatus::EndedPremature => Ok(SessionStatus::Active),
        SessionStatus::EndedComplete if completion < 100 => Ok(SessionStatus::Active),
        SessionStatus::EndedComplete => Ok(SessionStatus::Resumed),
        other => Err(SessionError::InvalidTransition {
            action: "resume",
            status: other,
        }),
    }
}

/// Transition fired by an answer update, if any. Only an `active` session
/// can auto-complete, so a summary is never written twice.
pub fn auto_complete(status: SessionStatus, completion: u32) -> Option<SessionStatus> {
    (status == SessionStatus::Active && completion == 100).then_some(SessionStatus::EndedComplete)
}

/// Copy counts into the session document.
pub fn refresh_counters(session: &mut Session, completion: Completion) {
    session.total_questions = completion.total_questions;
    session.answered_questions = completion.answered_questions;
    session.completion_percentage = completion.percentage;
}

/// Apply an end transition. Entering `ended-complete` writes the summary
/// computed from `snapshot`.
pub fn end(session: &mut Session, to: SessionStatus, snapshot: &QuestionSnapshot, at: jiff::Timestamp) {
    session.status = to;
    session.ended_at = Some(at);
    if to == SessionStatus::EndedComplete {
        session.summary_data = Some(summarize(snapshot));
    }
}
