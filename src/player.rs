use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{PlayerDataError, ShapeError};
use crate::position::{PositionRole, role_from_text};

/// Player record as supplied by the data source. A `None` stat is a present-but-null
/// value and reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayer {
    pub id: String,
    pub name: String,
    pub positions: Vec<String>,
    pub stats: HashMap<String, Option<f64>>,
    pub position_averages: HashMap<String, f64>,
}

impl RawPlayer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.positions.push(position.into());
        self
    }

    pub fn with_stat(mut self, key: impl Into<String>, value: f64) -> Self {
        self.stats.insert(key.into(), Some(value));
        self
    }

    pub fn with_average(mut self, key: impl Into<String>, value: f64) -> Self {
        self.position_averages.insert(key.into(), value);
        self
    }

    /// Stat value with null/missing read as 0.
    pub fn stat_value(&self, key: &str) -> f64 {
        self.stats.get(key).copied().flatten().unwrap_or(0.0)
    }

    pub fn position_average(&self, key: &str) -> Option<f64> {
        self.position_averages.get(key).copied()
    }

    pub fn is_goalkeeper(&self) -> bool {
        is_goalkeeper(&self.positions)
    }

    pub fn primary_position(&self) -> Option<&str> {
        self.positions.first().map(String::as_str)
    }
}

pub fn is_goalkeeper(positions: &[String]) -> bool {
    positions
        .iter()
        .any(|p| role_from_text(p) == Some(PositionRole::Goalkeeper))
}

pub fn parse_player_json(raw: &str) -> Result<RawPlayer, PlayerDataError> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(player_from_value(&value)?)
}

/// Accepts either a bare array of players or `{"players": [...]}`.
pub fn parse_players_json(raw: &str) -> Result<Vec<RawPlayer>, PlayerDataError> {
    let value: Value = serde_json::from_str(raw)?;
    let list = match &value {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("players") {
            Some(Value::Array(items)) => items,
            other => {
                return Err(ShapeError {
                    field: "players",
                    expected: "an array",
                    found: other.map(json_kind).unwrap_or("nothing"),
                }
                .into());
            }
        },
        other => {
            return Err(ShapeError {
                field: "players",
                expected: "an array",
                found: json_kind(other),
            }
            .into());
        }
    };
    let mut out = Vec::with_capacity(list.len());
    for item in list {
        out.push(player_from_value(item)?);
    }
    Ok(out)
}

pub fn player_from_value(value: &Value) -> Result<RawPlayer, ShapeError> {
    let Value::Object(obj) = value else {
        return Err(ShapeError {
            field: "player",
            expected: "an object",
            found: json_kind(value),
        });
    };

    let id = match obj.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(RawPlayer {
        id,
        name,
        positions: parse_positions(obj)?,
        stats: parse_stats(obj)?,
        position_averages: parse_averages(obj)?,
    })
}

fn parse_positions(obj: &Map<String, Value>) -> Result<Vec<String>, ShapeError> {
    match obj.get("positions") {
        None | Some(Value::Null) => Ok(Vec::new()),
        // Some feeds send a single position string.
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(o) => o
                    .get("name")
                    .or_else(|| o.get("code"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect()),
        Some(other) => Err(ShapeError {
            field: "positions",
            expected: "an array of strings",
            found: json_kind(other),
        }),
    }
}

fn parse_stats(obj: &Map<String, Value>) -> Result<HashMap<String, Option<f64>>, ShapeError> {
    let map = match obj.get("stats") {
        None | Some(Value::Null) => return Ok(HashMap::new()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(ShapeError {
                field: "stats",
                expected: "an object",
                found: json_kind(other),
            });
        }
    };
    let mut out = HashMap::with_capacity(map.len());
    for (key, v) in map {
        let parsed = match v {
            Value::Null => None,
            other => {
                let n = numeric(other);
                if n.is_none() {
                    tracing::debug!(stat = %key, kind = json_kind(other), "non-numeric stat read as null");
                }
                n
            }
        };
        out.insert(key.clone(), parsed);
    }
    Ok(out)
}

fn parse_averages(obj: &Map<String, Value>) -> Result<HashMap<String, f64>, ShapeError> {
    let map = match obj.get("positionAverages") {
        None | Some(Value::Null) => return Ok(HashMap::new()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(ShapeError {
                field: "positionAverages",
                expected: "an object",
                found: json_kind(other),
            });
        }
    };
    Ok(map
        .iter()
        .filter_map(|(key, v)| numeric(v).map(|n| (key.clone(), n)))
        .collect())
}

fn numeric(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        // Numeric strings show up in some exports ("87.5", "61%").
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_array_is_a_shape_error() {
        let err = parse_player_json(r#"{"id": 1, "name": "A", "stats": [1, 2]}"#).unwrap_err();
        match err {
            PlayerDataError::Shape(shape) => {
                assert_eq!(shape.field, "stats");
                assert_eq!(shape.found, "an array");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn stats_primitive_is_a_shape_error() {
        let err = parse_player_json(r#"{"stats": 12}"#).unwrap_err();
        assert!(err.to_string().contains("`stats`"));
    }

    #[test]
    fn missing_fields_degrade() {
        let p = parse_player_json("{}").unwrap();
        assert!(p.id.is_empty());
        assert!(p.stats.is_empty());
        assert!(p.positions.is_empty());
    }

    #[test]
    fn null_and_junk_stats_read_as_zero() {
        let p = parse_player_json(
            r#"{"id": "p9", "stats": {"goals": null, "assists": "n/a", "passAccuracy": "81.5%", "shots": 3}}"#,
        )
        .unwrap();
        assert_eq!(p.stats.get("goals"), Some(&None));
        assert_eq!(p.stat_value("goals"), 0.0);
        assert_eq!(p.stat_value("assists"), 0.0);
        assert_eq!(p.stat_value("passAccuracy"), 81.5);
        assert_eq!(p.stat_value("shots"), 3.0);
        assert_eq!(p.stat_value("absent"), 0.0);
    }

    #[test]
    fn goalkeeper_detection() {
        let p = RawPlayer::new("1", "Keeper").with_position("GK");
        assert!(p.is_goalkeeper());
        let p = RawPlayer::new("2", "Striker").with_position("CF");
        assert!(!p.is_goalkeeper());
    }
}
