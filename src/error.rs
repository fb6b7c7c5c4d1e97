/// A player record field had the wrong JSON shape.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("player field `{field}` must be {expected}, found {found}")]
pub struct ShapeError {
    pub field: &'static str,
    pub expected: &'static str,
    pub found: &'static str,
}

#[derive(thiserror::Error, Debug)]
pub enum PlayerDataError {
    #[error("invalid player json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}
