use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::{empty_string_as_none, present_or_null};
use domain::action_item::{ActionItemPatch, NewActionItem};
use domain::action_item_status::ActionItemStatus;
use domain::{Id, IntoQueryFilterMap, QueryFilterMap};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct IndexParams {
    /// Only return action items owned by this transcript
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<i32>)]
    pub(crate) transcript_id: Option<Id>,
    /// Only return action items with this status
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(value_type = Option<ActionItemStatus>)]
    pub(crate) status: Option<ActionItemStatus>,
}

impl IntoQueryFilterMap for IndexParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        query_filter_map.insert(
            "transcript_id".to_string(),
            self.transcript_id.map(|id| Value::Int(Some(id))),
        );
        query_filter_map.insert(
            "status".to_string(),
            self.status
                .map(|status| Value::String(Some(Box::new(status.to_string())))),
        );

        query_filter_map
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"task": "Book the offsite venue", "owner": "Carol", "due_date": "next week", "transcript_id": 1}))]
pub(crate) struct CreateParams {
    pub(crate) task: String,
    pub(crate) owner: Option<String>,
    pub(crate) due_date: Option<String>,
    pub(crate) status: Option<ActionItemStatus>,
    pub(crate) tags: Option<String>,
    pub(crate) transcript_id: Id,
}

impl CreateParams {
    pub(crate) fn into_parts(self) -> (Id, NewActionItem) {
        (
            self.transcript_id,
            NewActionItem {
                task: self.task,
                owner: self.owner,
                due_date: self.due_date,
                status: self.status.unwrap_or_default(),
                tags: self.tags,
            },
        )
    }
}

/// Body of a partial update. Only the fields present in the request are changed;
/// `owner`, `due_date` and `tags` are cleared by an explicit `null`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[schema(example = json!({"owner": "Alice"}))]
pub(crate) struct UpdateParams {
    #[serde(default)]
    pub(crate) task: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub(crate) owner: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub(crate) due_date: Option<Option<String>>,
    #[serde(default)]
    pub(crate) status: Option<ActionItemStatus>,
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub(crate) tags: Option<Option<String>>,
}

impl From<UpdateParams> for ActionItemPatch {
    fn from(params: UpdateParams) -> Self {
        ActionItemPatch {
            task: params.task,
            owner: params.owner,
            due_date: params.due_date,
            status: params.status,
            tags: params.tags,
        }
    }
}
