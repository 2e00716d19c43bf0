use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDGET_CLASS: &str = "bmBtn";

/// Options object handed to `window.bmwidget.init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub class: String,
    pub context: String,
}

/// A widget initialisation bound to a page element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetInit {
    pub target_id: String,
    pub config: WidgetConfig,
}
