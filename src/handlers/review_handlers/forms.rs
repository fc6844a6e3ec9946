use serde::Deserialize;
use serde_json::Value;

use crate::models::participant::SortKey;

#[derive(Deserialize, Debug, Default)]
pub struct ViewQuery {
    #[serde(default)]
    pub sort: SortKey,
}

#[derive(Deserialize, Debug)]
pub struct RefreshRequest {
    #[serde(default)]
    pub confirm: bool,
}

/// Operator-typed number; kept raw so non-numeric input can be reported.
#[derive(Deserialize, Debug)]
pub struct ValueRequest {
    pub value: Value,
}
