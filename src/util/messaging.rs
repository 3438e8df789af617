use crate::config::MessagingConfig;

/// Builds pre-filled chat links for notifying a user about a verification
/// change. The link is handed back to the operator; nothing is sent.
#[derive(Debug, Clone)]
pub struct MessageLinkBuilder {
    config: MessagingConfig,
}

impl MessageLinkBuilder {
    pub fn new(config: MessagingConfig) -> Self {
        MessageLinkBuilder { config }
    }

    /// `None` when the phone number carries no digits.
    pub fn link(&self, phone: Option<&str>, text: &str) -> Option<String> {
        let digits: String = phone?.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        Some(format!(
            "{}/{}?text={}",
            self.config.base_url.trim_end_matches('/'),
            digits,
            urlencoding::encode(text)
        ))
    }

    pub fn verified_link(&self, phone: Option<&str>) -> Option<String> {
        self.link(phone, &self.config.verified_text)
    }

    pub fn restricted_link(&self, phone: Option<&str>) -> Option<String> {
        self.link(phone, &self.config.restricted_text)
    }
}
