use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::empty_string_as_none;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct IndexParams {
    /// How many of the most recent transcripts to return (default 5)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<u64>, minimum = 0)]
    pub(crate) limit: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"title": "Weekly sync", "content": "Bob: I'll send the budget draft by Friday."}))]
pub(crate) struct CreateParams {
    pub(crate) title: String,
    pub(crate) content: String,
}
