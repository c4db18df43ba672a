use tracing::Dispatch;

/// Diagnostic sink injected into each component at construction.
///
/// Components emit ordinary `tracing` events and run their work inside
/// [`Diagnostics::scope`], so the sink decides where (or whether) those
/// events go. The default sink discards everything.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    dispatch: Option<Dispatch>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            dispatch: Some(Dispatch::none()),
        }
    }
}

impl Diagnostics {
    /// Discard all diagnostic output.
    pub fn none() -> Self {
        Self::default()
    }

    /// Route diagnostic output to a caller-built subscriber.
    pub fn from_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    /// Route diagnostic output to whichever subscriber is current for the
    /// calling thread (normally the process-wide one).
    pub fn global() -> Self {
        Self { dispatch: None }
    }

    /// Run `f` with this sink as the active subscriber.
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}
