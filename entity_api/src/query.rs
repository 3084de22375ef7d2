use crate::error::Error;
use log::*;
use sea_orm::strum::IntoEnumIterator;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Value};
use std::collections::HashMap;

/// `QueryFilterMap` is a data structure that serves as a bridge for translating filter parameters
/// between different layers of the application. It is essentially a wrapper around a `HashMap`
/// where the keys are column names (as `String`) and the values are optional `Value` types
/// from `sea_orm`. A key mapped to `None` means "do not filter on this column".
///
/// # Example
///
/// ```
/// use sea_orm::Value;
/// use entity_api::query::QueryFilterMap;
///
/// let mut query_filter_map = QueryFilterMap::new();
/// query_filter_map.insert("transcript_id".to_string(), Some(Value::Int(Some(7))));
/// assert!(query_filter_map.get("transcript_id").is_some());
/// assert!(query_filter_map.get("status").is_none());
/// ```
#[derive(Debug)]
pub struct QueryFilterMap {
    map: HashMap<String, Option<Value>>,
}

impl QueryFilterMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        // HashMap.get returns an Option and so we need to "flatten" this to a single Option
        self.map
            .get(key)
            .and_then(|inner_option| inner_option.clone())
    }

    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

impl Default for QueryFilterMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a set of request parameters into a `QueryFilterMap` so that the web layer
/// can hand filters down to the data layer without knowing about columns.
pub trait IntoQueryFilterMap {
    fn into_query_filter_map(self) -> QueryFilterMap;
}

/// Find all records of an entity by the given query filter map. A key that does not
/// name one of the entity's columns is rejected with `InvalidQueryTerm`.
pub async fn find_by<E, C>(
    db: &impl ConnectionTrait,
    query_filter_map: QueryFilterMap,
) -> Result<Vec<E::Model>, Error>
where
    E: EntityTrait<Column = C>,
    C: ColumnTrait + IntoEnumIterator,
{
    let columns: Vec<String> = C::iter().map(|column| column.to_string()).collect();
    if let Some(term) = query_filter_map
        .keys()
        .find(|key| !columns.iter().any(|column| column == key))
    {
        warn!("Rejecting filter on unknown column \"{term}\"");
        return Err(Error::invalid_query_term(term));
    }

    let mut query = E::find();

    for column in C::iter() {
        if let Some(value) = query_filter_map.get(&column.to_string()) {
            query = query.filter(column.eq(value));
        }
    }

    Ok(query.all(db).await?)
}
