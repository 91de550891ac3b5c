use super::ResolvedLocaleContext;

/// Per request storage for the resolved locale context
///
/// Create one for each incoming request and hand it to every resolver call made while serving it. The cookie is parsed the first time, later calls read the stored value.
#[derive(Debug, Default)]
pub struct RequestScope {
    resolved: Option<ResolvedLocaleContext>
}

impl RequestScope {
    pub fn new() -> RequestScope {
        RequestScope::default()
    }

    /// Scope with an already resolved context, the cookie will not be looked at
    pub fn with_resolved(resolved: ResolvedLocaleContext) -> RequestScope {
        RequestScope {
            resolved: Some(resolved)
        }
    }

    /// Context resolved so far in this request, if any
    pub fn resolved(&self) -> Option<&ResolvedLocaleContext> {
        self.resolved.as_ref()
    }

    pub(crate) fn store(&mut self, resolved: ResolvedLocaleContext) {
        self.resolved = Some(resolved);
    }
}
