use serde::{Deserialize, Serialize};

/// Raw image record as supplied by the product provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub url: String,
    #[serde(default)]
    pub url_large: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
}

impl ImageRecord {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            url_large: None,
            alt_text: None,
        }
    }

    pub fn with_large<S: Into<String>>(mut self, url_large: S) -> Self {
        self.url_large = Some(url_large.into());
        self
    }

    pub fn with_alt<S: Into<String>>(mut self, alt_text: S) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }
}

/// Render-ready image with every fallback already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayImage {
    pub key: String,
    pub url: String,
    pub url_large: String,
    pub alt_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Layout {
    Wide,
    #[default]
    Narrow,
}

impl Layout {
    pub fn from_wide(is_wide: bool) -> Self {
        if is_wide { Layout::Wide } else { Layout::Narrow }
    }

    pub fn is_wide(self) -> bool {
        matches!(self, Layout::Wide)
    }

    /// The layout that is not this one.
    pub fn other(self) -> Self {
        match self {
            Layout::Wide => Layout::Narrow,
            Layout::Narrow => Layout::Wide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_record_from_api_json() {
        let json = r#"{"url":"https://cdn/a.jpg","urlLarge":"https://cdn/a_2000.jpg","altText":null}"#;
        let record: ImageRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.url, "https://cdn/a.jpg");
        assert_eq!(record.url_large.as_deref(), Some("https://cdn/a_2000.jpg"));
        assert!(record.alt_text.is_none());
    }

    #[test]
    fn test_image_record_missing_optional_fields() {
        let record: ImageRecord = serde_json::from_str(r#"{"url":"u"}"#).unwrap();
        assert_eq!(record, ImageRecord::new("u"));
    }

    #[test]
    fn test_layout_other() {
        assert_eq!(Layout::Wide.other(), Layout::Narrow);
        assert_eq!(Layout::Narrow.other(), Layout::Wide);
        assert_eq!(Layout::from_wide(true), Layout::Wide);
        assert!(!Layout::default().is_wide());
    }
}
