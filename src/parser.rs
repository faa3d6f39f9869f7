use crate::ir::{Item, ReportField, SentimentReport, TrendPoint};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported dataset shape: expected an item array or an analytics object")]
    UnsupportedShape,
    #[error("'{field}' must map names to numbers (entry '{name}')")]
    NonNumericScore { field: &'static str, name: String },
    #[error("item '{0}' has a non-finite weight")]
    NonFiniteWeight(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Items(Vec<Item>),
    Report(SentimentReport),
}

impl Dataset {
    pub fn into_items(self, field: ReportField) -> Vec<Item> {
        match self {
            Dataset::Items(items) => items,
            Dataset::Report(report) => report.items(field),
        }
    }
}

/// Parses either a plain item array or an analytics document.
///
/// Analytics documents carry `sentiment`/`sentiments` and
/// `emotions`/`six_emotions` objects, optionally nested under
/// `averageAnalytics`, plus an optional `dailyTrend` list.
pub fn parse_dataset(input: &str) -> Result<Dataset, DatasetError> {
    let value: Value = serde_json::from_str(input)?;
    match value {
        Value::Array(_) => {
            let items: Vec<Item> = serde_json::from_value(value)?;
            for item in &items {
                if !item.weight.is_finite() {
                    return Err(DatasetError::NonFiniteWeight(item.label.clone()));
                }
            }
            Ok(Dataset::Items(items))
        }
        Value::Object(mut root) => {
            if let Some(Value::Object(inner)) = root.remove("averageAnalytics") {
                root = inner;
            }
            parse_report(&root).map(Dataset::Report)
        }
        _ => Err(DatasetError::UnsupportedShape),
    }
}

fn parse_report(root: &Map<String, Value>) -> Result<SentimentReport, DatasetError> {
    let sentiment = lookup(root, &["sentiment", "sentiments"]);
    let emotions = lookup(root, &["emotions", "six_emotions", "sixEmotions"]);
    if sentiment.is_none() && emotions.is_none() {
        return Err(DatasetError::UnsupportedShape);
    }
    let daily_trend = match lookup(root, &["dailyTrend", "daily_trend"]) {
        Some(value) => serde_json::from_value::<Vec<TrendPoint>>(value.clone())?,
        None => Vec::new(),
    };
    Ok(SentimentReport {
        sentiment: scores(sentiment, "sentiment")?,
        emotions: scores(emotions, "emotions")?,
        daily_trend,
    })
}

fn lookup<'a>(root: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| root.get(*key))
}

fn scores(value: Option<&Value>, field: &'static str) -> Result<Vec<(String, f32)>, DatasetError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let Value::Object(map) = value else {
        return Err(DatasetError::UnsupportedShape);
    };
    map.iter()
        .map(|(name, score)| match score.as_f64() {
            Some(number) if number.is_finite() => Ok((name.clone(), number as f32)),
            _ => Err(DatasetError::NonNumericScore {
                field,
                name: name.clone(),
            }),
        })
        .collect()
}
