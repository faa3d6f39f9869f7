use serde::{Deserialize, Serialize};

/// Free-form key/value data attached to an item, shown in its tooltip.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudKind {
    Words,
    Bubbles,
}

impl CloudKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CloudKind::Words => "words",
            CloudKind::Bubbles => "bubbles",
        }
    }
}

/// One labeled, weighted input to a cloud widget.
///
/// Word-cloud data uses `word`/`size`/`meta`, bubble-cloud data uses
/// `text`/`value`; both spellings deserialize into the same item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(alias = "word", alias = "text")]
    pub label: String,
    #[serde(alias = "size", alias = "value")]
    pub weight: f32,
    #[serde(default, alias = "meta")]
    pub metadata: Metadata,
}

impl Item {
    pub fn new(label: impl Into<String>, weight: f32) -> Self {
        Self {
            label: label.into(),
            weight,
            metadata: Metadata::new(),
        }
    }

    pub fn with_meta(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: String,
    pub positive: f32,
    pub negative: f32,
}

/// Averaged analytics for a body of text: sentiment split and emotion scores,
/// both as percentages keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentReport {
    pub sentiment: Vec<(String, f32)>,
    pub emotions: Vec<(String, f32)>,
    pub daily_trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportField {
    Sentiment,
    #[default]
    Emotions,
}

impl SentimentReport {
    pub fn dominant_sentiment(&self) -> Option<(&str, f32)> {
        dominant(&self.sentiment)
    }

    pub fn dominant_emotion(&self) -> Option<(&str, f32)> {
        dominant(&self.emotions)
    }

    pub fn items(&self, field: ReportField) -> Vec<Item> {
        let entries = match field {
            ReportField::Sentiment => &self.sentiment,
            ReportField::Emotions => &self.emotions,
        };
        entries
            .iter()
            .map(|(name, score)| {
                Item::new(name.clone(), *score)
                    .with_meta("category", field_name(field))
                    .with_meta("percent", *score as f64)
            })
            .collect()
    }
}

fn field_name(field: ReportField) -> &'static str {
    match field {
        ReportField::Sentiment => "sentiment",
        ReportField::Emotions => "emotion",
    }
}

// First maximum wins, so ties resolve to the earlier entry.
fn dominant(entries: &[(String, f32)]) -> Option<(&str, f32)> {
    let mut best: Option<(&str, f32)> = None;
    for (name, score) in entries {
        match best {
            Some((_, top)) if *score <= top => {}
            _ => best = Some((name.as_str(), *score)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SentimentReport {
        SentimentReport {
            sentiment: vec![
                ("positive".to_string(), 65.0),
                ("neutral".to_string(), 20.0),
                ("negative".to_string(), 15.0),
            ],
            emotions: vec![
                ("happy".to_string(), 50.0),
                ("sad".to_string(), 10.0),
                ("surprise".to_string(), 15.0),
                ("disgust".to_string(), 15.0),
            ],
            daily_trend: Vec::new(),
        }
    }

    #[test]
    fn dominant_picks_maximum() {
        let report = report();
        assert_eq!(report.dominant_sentiment(), Some(("positive", 65.0)));
        assert_eq!(report.dominant_emotion(), Some(("happy", 50.0)));
    }

    #[test]
    fn dominant_ties_keep_first() {
        let entries = vec![("surprise".to_string(), 15.0), ("disgust".to_string(), 15.0)];
        assert_eq!(dominant(&entries), Some(("surprise", 15.0)));
        assert_eq!(dominant(&[]), None);
    }

    #[test]
    fn report_items_carry_category() {
        let items = report().items(ReportField::Sentiment);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].label, "positive");
        assert_eq!(items[0].weight, 65.0);
        assert_eq!(items[0].metadata["category"], "sentiment");
    }

    #[test]
    fn item_accepts_word_cloud_spelling() {
        let item: Item =
            serde_json::from_str(r#"{"word":"React","size":100,"meta":{"type":"framework"}}"#)
                .unwrap();
        assert_eq!(item.label, "React");
        assert_eq!(item.weight, 100.0);
        assert_eq!(item.metadata["type"], "framework");
    }
}
