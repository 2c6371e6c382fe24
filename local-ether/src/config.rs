/// Device name prefix the Linux backend appends the index to.
pub const DEFAULT_DEVICE_PREFIX: &str = "eth";

/// Optional knobs for a lookup. `None` fields fall back to built-in defaults.
///
/// Backends read only the fields that apply to them; the others are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupConfig {
    /// Prefix of the device name queried by the Linux backend (`eth` by default,
    /// so index 2 queries `eth2`).
    pub device_prefix: Option<String>,
}

impl LookupConfig {
    pub fn with_device_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.device_prefix = Some(prefix.into());
        self
    }

    pub fn device_prefix(&self) -> &str {
        self.device_prefix
            .as_deref()
            .unwrap_or(DEFAULT_DEVICE_PREFIX)
    }
}
