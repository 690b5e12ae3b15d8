/// What the page knows about the current user.
///
/// The join controls only check it to spare an anonymous user a round trip;
/// the server authorizes every request on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    github_handle: Option<String>,
}

impl Context {
    pub fn new(github_handle: Option<String>) -> Self {
        Self { github_handle: github_handle.filter(|handle| !handle.trim().is_empty()) }
    }
    pub fn anonymous() -> Self {
        Self::default()
    }
    pub fn github_handle(&self) -> Option<&str> {
        self.github_handle.as_deref()
    }
    pub fn is_authenticated(&self) -> bool {
        self.github_handle.is_some()
    }
}
