use crate::actor::Actor;

/// Seam to the external identity/session provider.
///
/// The ledger only needs "who is acting right now"; sign-in/out and token
/// plumbing stay on the provider's side of this trait.
pub trait SessionProvider: Send + Sync {
    /// The currently signed-in actor, if any.
    fn current_actor(&self) -> Option<Actor>;
}

/// Fixed session for tests and demos.
#[derive(Debug, Clone)]
pub struct FixedSession(pub Actor);

impl SessionProvider for FixedSession {
    fn current_actor(&self) -> Option<Actor> {
        Some(self.0.clone())
    }
}
