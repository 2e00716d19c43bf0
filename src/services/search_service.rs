use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::widget::{WidgetConfig, WidgetInit, DEFAULT_WIDGET_CLASS};

/// Element the chat widget is bound to.
pub const CHAT_BUTTON_ID: &str = "chatBtn";

#[derive(Error, Debug)]
pub enum SearchServiceError {
    #[error("Widget context is not valid base64: {0}")]
    InvalidContext(#[from] base64::DecodeError),

    #[error("Widget context is not valid UTF-8: {0}")]
    InvalidText(#[from] std::string::FromUtf8Error),
}

/// Hands a search query over to the chat widget as its context.
pub struct SearchService {
    widget_class: String,
}

impl Default for SearchService {
    fn default() -> Self {
        Self::new(DEFAULT_WIDGET_CLASS)
    }
}

impl SearchService {
    pub fn new(widget_class: impl Into<String>) -> Self {
        Self {
            widget_class: widget_class.into(),
        }
    }

    /// Build the widget initialisation for `query`.
    ///
    /// The query text itself is encoded, whatever it contains.
    pub fn dispatch(&self, query: &str) -> WidgetInit {
        info!("User query: {}", query);

        let context = encode_context(query);
        debug!("Widget context: {}", context);

        WidgetInit {
            target_id: CHAT_BUTTON_ID.to_string(),
            config: WidgetConfig {
                class: self.widget_class.clone(),
                context,
            },
        }
    }
}

pub fn encode_context(query: &str) -> String {
    STANDARD.encode(query.as_bytes())
}

pub fn decode_context(context: &str) -> Result<String, SearchServiceError> {
    let bytes = STANDARD.decode(context.trim())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_encodes_query_text() {
        let init = SearchService::default().dispatch("shoes");

        assert_eq!(init.target_id, "chatBtn");
        assert_eq!(init.config.class, "bmBtn");
        assert_eq!(init.config.context, "c2hvZXM=");
        assert_eq!(decode_context(&init.config.context).unwrap(), "shoes");
    }

    #[test]
    fn test_custom_widget_class() {
        let init = SearchService::new("chatBubble").dispatch("red running shoes");
        assert_eq!(init.config.class, "chatBubble");
        assert_eq!(decode_context(&init.config.context).unwrap(), "red running shoes");
    }

    #[test]
    fn test_empty_query_is_still_dispatched() {
        let init = SearchService::default().dispatch("");
        assert_eq!(init.config.context, "");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_context("not base64!"),
            Err(SearchServiceError::InvalidContext(_))
        ));
        // 0xFF 0xFE is valid base64 but not UTF-8
        assert!(matches!(
            decode_context("//4="),
            Err(SearchServiceError::InvalidText(_))
        ));
    }
}
