//! Riddle pool loading.
//!
//! File layout: `{ "enigmas": [ { "pergunta", "opcoes", "correta" } ] }`.
//! Malformed entries are skipped with a warning; only an unreadable or
//! unparseable file is an error.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{GameError, Result};
use crate::model::Riddle;

#[derive(Debug, Deserialize)]
struct RiddleFile {
    enigmas: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct RawRiddle {
    pergunta: Option<String>,
    opcoes: Option<Vec<Value>>,
    correta: Option<Value>,
}

/// Load every valid riddle from `path`. A missing file yields an empty pool.
pub fn load_riddles(path: &Path) -> Result<Vec<Riddle>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "riddles file not found, riddle rooms stay open");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    parse_riddles(&content).map_err(|message| GameError::InvalidJson {
        path: path.display().to_string(),
        message,
    })
}

pub(crate) fn parse_riddles(content: &str) -> std::result::Result<Vec<Riddle>, String> {
    let file: RiddleFile = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let Some(entries) = file.enigmas.filter(|entries| !entries.is_empty()) else {
        tracing::warn!("no 'enigmas' array in riddles file");
        return Ok(Vec::new());
    };

    let riddles: Vec<Riddle> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match parse_entry(value) {
            Ok(riddle) => Some(riddle),
            Err(reason) => {
                tracing::warn!(entry = i, "skipping riddle: {}", reason);
                None
            }
        })
        .collect();

    tracing::debug!(count = riddles.len(), "riddles loaded");
    Ok(riddles)
}

fn parse_entry(value: Value) -> std::result::Result<Riddle, String> {
    let raw: RawRiddle = serde_json::from_value(value).map_err(|e| e.to_string())?;

    let question = raw
        .pergunta
        .filter(|q| !q.trim().is_empty())
        .ok_or("missing question")?;

    let correct = match raw.correta {
        None | Some(Value::Null) => return Err("missing correct answer".to_string()),
        Some(value) => as_integer(&value)
            .ok_or_else(|| format!("correct answer is not a number: {}", value))?,
    };

    let options: Vec<String> = raw
        .opcoes
        .unwrap_or_default()
        .into_iter()
        .filter_map(|option| match option {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        })
        .collect();
    if options.is_empty() {
        return Err("no options".to_string());
    }

    if correct < 0 || correct as usize >= options.len() {
        return Err(format!("correct answer index out of range: {}", correct));
    }

    Ok(Riddle::new(question, options, correct as usize))
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
