/// Process-level settings for the widget runtime.
///
/// Merchant settings arrive from the host at runtime; this only covers the
/// knobs an operator sets through the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub log_level: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            fetch_timeout_secs: 30,
            user_agent: "addrfield/0.1 (checkout-address-fields)".to_owned(),
        }
    }
}
