//! sea-orm entities owned by the identity service.

pub mod outbox_events;
pub mod sessions;
pub mod users;
