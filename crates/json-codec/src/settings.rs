//! Codec configuration shared by every document a codec produces.

use serde::{Deserialize, Serialize};

/// Settings for [`crate::JsonCodec`] and the documents it produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSettings {
    /// Namespace used to qualify unqualified discriminator values
    /// (e.g. `"FooError"` becomes `"<namespace>#FooError"`).
    #[serde(default)]
    pub default_namespace: Option<String>,
}

impl JsonSettings {
    /// Settings with no default namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default namespace.
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = Some(namespace.into());
        self
    }

    /// The default namespace, if configured.
    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }
}
