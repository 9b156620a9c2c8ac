//! List response envelope: `{ "data": [...], "count": n }`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Collection<T> {
    pub data: Vec<T>,
    pub count: u64,
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(data: Vec<T>) -> Self {
        let count = data.len() as u64;
        Collection { data, count }
    }
}
