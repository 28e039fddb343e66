//! Cancellation scope handed to every port call
//!
//! A scope names the UI component a request belongs to (used for tracker
//! bookkeeping) and carries the token that cancels it. Child scopes are
//! cancelled together with their parent, so dropping a view's root scope
//! reaches every request it started.

use std::borrow::Cow;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct RequestScope {
    component: Cow<'static, str>,
    cancel: CancellationToken,
}

impl RequestScope {
    /// Fresh root scope for `component`
    pub fn new(component: impl Into<Cow<'static, str>>) -> Self {
        Self { component: component.into(), cancel: CancellationToken::new() }
    }

    /// Child scope for the same component, cancelled when `self` is
    pub fn child(&self) -> Self {
        Self { component: self.component.clone(), cancel: self.cancel.child_token() }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
