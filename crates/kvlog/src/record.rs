use indexmap::IndexMap;

/// Fixed attribute names written for every log record.
pub mod columns {
    pub const HOST: &str = "host";
    pub const CONTEXT: &str = "context";
    pub const TIME: &str = "time";
    pub const MESSAGE: &str = "msg";
    pub const LEVEL: &str = "level";
    pub const LOGGER: &str = "logger";
    pub const MDC_PREFIX: &str = "mdc.";
}

/// A structured log event as handed to the writer.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogRecord {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub logger: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Diagnostic context, kept in insertion order.
    #[serde(default)]
    pub mdc: IndexMap<String, String>,
}

impl LogRecord {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_mdc(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.mdc.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    /// Whether the store should overwrite existing values for this name.
    /// Log writes always append.
    pub replace: bool,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            replace: false,
        }
    }
}

/// One record in its on-the-wire form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WriteItem {
    pub key: String,
    pub attributes: Vec<Attribute>,
}

impl WriteItem {
    pub fn new(key: String, attributes: Vec<Attribute>) -> Self {
        Self { key, attributes }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }
}
