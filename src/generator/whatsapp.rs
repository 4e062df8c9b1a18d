//! WhatsApp deep links.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::fmt;

/// Characters escaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A pre-filled `wa.me` chat link. Opening it is fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhatsAppLink {
    pub number: String,
    pub message: String,
}

impl WhatsAppLink {
    pub fn new(number: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            message: message.into(),
        }
    }

    /// The full URL with the message URL-encoded.
    pub fn url(&self) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.number,
            utf8_percent_encode(&self.message, URI_COMPONENT)
        )
    }
}

impl fmt::Display for WhatsAppLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encodes_like_encode_uri_component() {
        let link = WhatsAppLink::new("5511987654321", "Pedido:\n\nM&Ms x1: R$ 3.00 (ok)");
        assert_eq!(
            link.url(),
            "https://wa.me/5511987654321?text=Pedido%3A%0A%0AM%26Ms%20x1%3A%20R%24%203.00%20(ok)"
        );
    }

    #[test]
    fn test_non_ascii_is_utf8_encoded() {
        let link = WhatsAppLink::new("55", "às");
        assert_eq!(link.to_string(), "https://wa.me/55?text=%C3%A0s");
    }
}
