use super::fragment::TagCategory;
use radar_core::MarkerConfig;

/// Marker strings recognised inside annotated spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVocabulary {
    markers: Vec<(String, TagCategory)>,
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self::from(&MarkerConfig::default())
    }
}

impl From<&MarkerConfig> for TagVocabulary {
    fn from(config: &MarkerConfig) -> Self {
        let groups = [
            (&config.highlight, TagCategory::Highlight),
            (&config.key_person, TagCategory::KeyPerson),
            (&config.opportunity, TagCategory::Opportunity),
            (&config.risk, TagCategory::Risk),
            (&config.strategy, TagCategory::Strategy),
        ];

        let markers = groups
            .into_iter()
            .flat_map(|(markers, category)| markers.iter().map(move |m| (m.clone(), category)))
            .filter(|(marker, _)| !marker.is_empty())
            .collect();

        Self { markers }
    }
}

impl TagVocabulary {
    pub fn empty() -> Self {
        Self { markers: Vec::new() }
    }

    pub fn with_marker(mut self, marker: impl Into<String>, category: TagCategory) -> Self {
        let marker = marker.into();
        if !marker.is_empty() {
            self.markers.push((marker, category));
        }
        self
    }

    /// Category of the marker occurring earliest in `inner`.
    ///
    /// When two markers start at the same byte the longer one wins, then the
    /// one registered first.
    pub fn classify(&self, inner: &str) -> TagCategory {
        self.markers
            .iter()
            .filter_map(|(marker, category)| inner.find(marker.as_str()).map(|pos| (pos, marker.len(), *category)))
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
            .map(|(_, _, category)| category)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
