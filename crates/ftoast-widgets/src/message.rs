#![forbid(unsafe_code)]

//! Toast message payloads and their rendering.
//!
//! A message is one of three variants, each with a single rendering rule:
//!
//! | Variant | Rendering |
//! |---------|-----------|
//! | [`ToastMessage::Text`] | HTML-escaped text |
//! | [`ToastMessage::Markup`] | inserted verbatim (the caller built it) |
//! | [`ToastMessage::Rich`] | icon, title and body composed from escaped parts |
//!
//! The variant is resolved once, when the toast is constructed; the rendered
//! [`Markup`] is what the host mounts.

use std::fmt;

/// Rendered content ready to be mounted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup(String);

impl Markup {
    /// Wrap pre-built markup without escaping.
    #[must_use]
    pub fn trusted(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Escape plain text into markup.
    #[must_use]
    pub fn escape(text: &str) -> Self {
        let mut out = String::with_capacity(text.len());
        push_escaped(&mut out, text);
        Self(out)
    }

    /// The markup source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the markup is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Icon displayed in a rich toast to indicate message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastIcon {
    /// Success indicator (checkmark).
    Success,
    /// Error indicator (X mark).
    Error,
    /// Warning indicator (exclamation).
    Warning,
    /// Information indicator (i).
    #[default]
    Info,
    /// Custom single character.
    Custom(char),
}

impl ToastIcon {
    /// Get the display character for this icon.
    pub fn as_char(self) -> char {
        match self {
            Self::Success => '\u{2713}', // ✓
            Self::Error => '\u{2717}',   // ✗
            Self::Warning => '!',
            Self::Info => 'i',
            Self::Custom(c) => c,
        }
    }

    /// Modifier class for the icon element.
    fn class(self) -> &'static str {
        match self {
            Self::Success => "toast-icon-success",
            Self::Error => "toast-icon-error",
            Self::Warning => "toast-icon-warning",
            Self::Info => "toast-icon-info",
            Self::Custom(_) => "toast-icon-custom",
        }
    }
}

/// Structured toast content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichContent {
    /// Main message text.
    pub body: String,
    /// Optional title.
    pub title: Option<String>,
    /// Optional icon.
    pub icon: Option<ToastIcon>,
}

impl RichContent {
    /// Create new content with just a body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            title: None,
            icon: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: ToastIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    fn is_empty(&self) -> bool {
        self.body.is_empty() && self.title.as_deref().is_none_or(str::is_empty)
    }

    fn render(&self) -> Markup {
        let mut out = String::new();
        if let Some(icon) = self.icon {
            out.push_str("<span class=\"toast-icon ");
            out.push_str(icon.class());
            out.push_str("\">");
            push_escaped(&mut out, icon.as_char().encode_utf8(&mut [0; 4]));
            out.push_str("</span>");
        }
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            out.push_str("<span class=\"toast-title\">");
            push_escaped(&mut out, title);
            out.push_str("</span>");
        }
        if !self.body.is_empty() {
            out.push_str("<span class=\"toast-body\">");
            push_escaped(&mut out, &self.body);
            out.push_str("</span>");
        }
        Markup(out)
    }
}

/// Payload of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastMessage {
    /// Plain text; escaped when rendered.
    Text(String),
    /// Pre-built markup; rendered verbatim.
    Markup(Markup),
    /// Structured content.
    Rich(RichContent),
}

impl ToastMessage {
    /// Plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Pre-built markup message.
    pub fn markup(markup: impl Into<String>) -> Self {
        Self::Markup(Markup::trusted(markup))
    }

    /// Whether the message has nothing to show.
    ///
    /// Toasts are never created for empty messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Markup(markup) => markup.is_empty(),
            Self::Rich(content) => content.is_empty(),
        }
    }

    /// Render the payload into mountable markup.
    #[must_use]
    pub fn render(&self) -> Markup {
        match self {
            Self::Text(text) => Markup::escape(text),
            Self::Markup(markup) => markup.clone(),
            Self::Rich(content) => content.render(),
        }
    }
}

impl From<&str> for ToastMessage {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for ToastMessage {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Markup> for ToastMessage {
    fn from(markup: Markup) -> Self {
        Self::Markup(markup)
    }
}

impl From<RichContent> for ToastMessage {
    fn from(content: RichContent) -> Self {
        Self::Rich(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped() {
        let msg = ToastMessage::from("<b>Saved</b> & \"done\"");
        assert_eq!(
            msg.render().as_str(),
            "&lt;b&gt;Saved&lt;/b&gt; &amp; &quot;done&quot;"
        );
    }

    #[test]
    fn markup_is_verbatim() {
        let msg = ToastMessage::markup("<b>Saved</b>");
        assert_eq!(msg.render().as_str(), "<b>Saved</b>");
    }

    #[test]
    fn rich_content_composes_escaped_parts() {
        let msg = ToastMessage::from(
            RichContent::new("3 < 4")
                .with_title("Math")
                .with_icon(ToastIcon::Success),
        );
        assert_eq!(
            msg.render().as_str(),
            "<span class=\"toast-icon toast-icon-success\">\u{2713}</span>\
             <span class=\"toast-title\">Math</span>\
             <span class=\"toast-body\">3 &lt; 4</span>"
        );
    }

    #[test]
    fn empty_detection_per_variant() {
        assert!(ToastMessage::from("").is_empty());
        assert!(!ToastMessage::from(" ").is_empty());
        assert!(ToastMessage::markup("").is_empty());
        assert!(ToastMessage::from(RichContent::default()).is_empty());
        assert!(ToastMessage::from(RichContent::new("").with_title("")).is_empty());
        assert!(!ToastMessage::from(RichContent::new("").with_title("Heads up")).is_empty());
    }

    #[test]
    fn icon_only_rich_content_is_empty() {
        let content = RichContent::default().with_icon(ToastIcon::Warning);
        assert!(ToastMessage::from(content).is_empty());
    }

    #[test]
    fn icon_chars() {
        assert_eq!(ToastIcon::Success.as_char(), '\u{2713}');
        assert_eq!(ToastIcon::Custom('*').as_char(), '*');
    }
}
