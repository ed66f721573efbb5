//! metav1 option objects and their query-parameter encoding

use url::form_urlencoded;

/// Encodes an option object as URL query parameters
pub trait ParameterCodec {
    /// Append this object's parameters to `qp`
    fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<'_, String>);

    /// Encoded `key=value&...` string, empty if nothing is set
    fn to_query(&self) -> String {
        let mut qp = form_urlencoded::Serializer::new(String::new());
        self.populate_qp(&mut qp);
        qp.finish()
    }

    /// `path` with the encoded parameters appended as `?query`
    fn append_to(&self, path: &str) -> String {
        let query = self.to_query();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }
}

/// Options for list calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// A selector to restrict the list of returned objects by their labels.
    pub label_selector: Option<String>,

    /// A selector to restrict the list of returned objects by their fields.
    pub field_selector: Option<String>,

    /// Limit the number of results; the server returns a continue token if
    /// more are available.
    pub limit: Option<u32>,

    /// Continue token from a previous limited list.
    pub continue_token: Option<String>,

    pub resource_version: Option<String>,

    /// Server-side timeout for the call.
    pub timeout_seconds: Option<u32>,
}

impl ListOptions {
    #[must_use]
    pub fn fields(mut self, field_selector: &str) -> Self {
        self.field_selector = Some(field_selector.to_string());
        self
    }

    #[must_use]
    pub fn labels(mut self, label_selector: &str) -> Self {
        self.label_selector = Some(label_selector.to_string());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn continue_token(mut self, token: &str) -> Self {
        self.continue_token = Some(token.to_string());
        self
    }
}

impl ParameterCodec for ListOptions {
    fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<'_, String>) {
        if let Some(labels) = &self.label_selector {
            qp.append_pair("labelSelector", labels);
        }
        if let Some(fields) = &self.field_selector {
            qp.append_pair("fieldSelector", fields);
        }
        if let Some(rv) = &self.resource_version {
            qp.append_pair("resourceVersion", rv);
        }
        if let Some(timeout) = &self.timeout_seconds {
            qp.append_pair("timeoutSeconds", &timeout.to_string());
        }
        if let Some(limit) = &self.limit {
            qp.append_pair("limit", &limit.to_string());
        }
        if let Some(continue_token) = &self.continue_token {
            qp.append_pair("continue", continue_token);
        }
    }
}

/// Options for create calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Validate the request server-side without persisting it
    pub dry_run: bool,
    /// Name of the actor making the change
    pub field_manager: Option<String>,
    /// `Ignore`, `Warn` or `Strict`
    pub field_validation: Option<String>,
}

impl ParameterCodec for CreateOptions {
    fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<'_, String>) {
        if self.dry_run {
            qp.append_pair("dryRun", "All");
        }
        if let Some(manager) = &self.field_manager {
            qp.append_pair("fieldManager", manager);
        }
        if let Some(validation) = &self.field_validation {
            qp.append_pair("fieldValidation", validation);
        }
    }
}

/// How dependents are handled when an object is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationPolicy {
    Orphan,
    Background,
    Foreground,
}

impl PropagationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropagationPolicy::Orphan => "Orphan",
            PropagationPolicy::Background => "Background",
            PropagationPolicy::Foreground => "Foreground",
        }
    }
}

/// Options for delete calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    pub dry_run: bool,
    /// Seconds before the object is forcibly removed; `0` deletes immediately
    pub grace_period_seconds: Option<u32>,
    pub propagation_policy: Option<PropagationPolicy>,
}

impl DeleteOptions {
    pub fn background() -> Self {
        Self {
            propagation_policy: Some(PropagationPolicy::Background),
            ..Self::default()
        }
    }

    pub fn foreground() -> Self {
        Self {
            propagation_policy: Some(PropagationPolicy::Foreground),
            ..Self::default()
        }
    }
}

impl ParameterCodec for DeleteOptions {
    fn populate_qp(&self, qp: &mut form_urlencoded::Serializer<'_, String>) {
        if let Some(grace) = &self.grace_period_seconds {
            qp.append_pair("gracePeriodSeconds", &grace.to_string());
        }
        if let Some(policy) = &self.propagation_policy {
            qp.append_pair("propagationPolicy", policy.as_str());
        }
        if self.dry_run {
            qp.append_pair("dryRun", "All");
        }
    }
}
