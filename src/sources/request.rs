//! Request coordinates for the config server.

/// Profile used when none are given.
pub const DEFAULT_PROFILE: &str = "default";

/// Stand-in for `/` inside a label.
const LABEL_SLASH: &str = "(_)";

/// Identifies which configuration to fetch: an application, its active
/// profiles, and optionally a label (branch or tag).
///
/// # Examples
///
/// ```rust
/// use cloud_config_client::sources::ConfigRequest;
///
/// let request = ConfigRequest::new("inventory")
///     .with_profiles(["dev", "local"])
///     .with_label("master");
///
/// assert_eq!(request.path(), "/inventory/dev,local/master");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRequest {
    application: String,
    profiles: Vec<String>,
    label: Option<String>,
}

impl ConfigRequest {
    /// Create a request for an application with no profiles or label.
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            profiles: Vec::new(),
            label: None,
        }
    }

    /// Add a single profile. Order matters: the server gives later profiles
    /// higher priority.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profiles.push(profile.into());
        self
    }

    /// Add several profiles in order.
    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles.extend(profiles.into_iter().map(Into::into));
        self
    }

    /// Set the label. An empty label means the server's default.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = (!label.is_empty()).then_some(label);
        self
    }

    /// The application name.
    pub fn application(&self) -> &str {
        &self.application
    }

    /// The profiles, in request order.
    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    /// The label, if one was set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Profiles joined with `,`, or [`DEFAULT_PROFILE`] when there are none.
    pub fn profile_list(&self) -> String {
        if self.profiles.is_empty() {
            DEFAULT_PROFILE.to_string()
        } else {
            self.profiles.join(",")
        }
    }

    /// The request path: `/{application}/{profiles}[/{label}]`.
    ///
    /// A `/` in the label (e.g. a `feature/x` branch) is sent as `(_)`, which
    /// the server maps back to a slash.
    pub fn path(&self) -> String {
        match &self.label {
            Some(label) => format!(
                "/{}/{}/{}",
                self.application,
                self.profile_list(),
                label.replace('/', LABEL_SLASH)
            ),
            None => format!("/{}/{}", self.application, self.profile_list()),
        }
    }
}
