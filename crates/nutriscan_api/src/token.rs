/// Supplies bearer tokens to the API client and hears about rejections.
///
/// The session provider in the application crate implements this; the
/// client only ever sees the seam. A 401 from the backend means the stored
/// session is dead, so `on_unauthorized` doubles as the forced sign-out
/// hook.
pub trait TokenSource: Send + Sync {
    /// Current bearer token, if a session is active.
    fn bearer_token(&self) -> Option<String>;

    /// Called once per request that came back 401.
    fn on_unauthorized(&self);
}

/// Token source for guest (unauthenticated) clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl TokenSource for NoAuth {
    fn bearer_token(&self) -> Option<String> {
        None
    }

    fn on_unauthorized(&self) {}
}
