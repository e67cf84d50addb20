//! Notification rendering and dispatch collaborators

mod dispatch;
mod sign;
mod social;

pub use dispatch::{
    x_intent_url, Channel, CommunicationLog, DispatchError, DispatchReceipt, LogEntry,
    SimulatedVms, VmsDispatcher, X_INTENT_BASE,
};
pub use sign::{render_sign, SIGN_MAX_ENTRIES};
pub use social::render_social;
