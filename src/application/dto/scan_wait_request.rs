/// ScanWaitRequest - what to wait for and for how long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWaitRequest {
    pub project_name: String,
    pub project_version_name: String,
    /// Overrides the tracker's timeout; values `<= 0` fall back to the default
    pub timeout_ms: Option<i64>,
}

impl ScanWaitRequest {
    pub fn new(project_name: impl Into<String>, project_version_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            project_version_name: project_version_name.into(),
            timeout_ms: None,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}
