use serde::Serialize;

use crate::listing::Pagination;

/// Body of every successful response:
///
/// ```json
/// { "success": true, "count": 2, "data": [ ... ] }
/// ```
///
/// `count` and `pagination` are only present on collection responses.
#[derive(Serialize, Debug)]
pub struct Envelope<T: Serialize> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,

    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(data: T) -> Self {
        Envelope {
            success: true,
            count: None,
            pagination: None,
            data,
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    pub fn counted(data: Vec<T>) -> Self {
        Envelope {
            success: true,
            count: Some(data.len()),
            pagination: None,
            data,
        }
    }

    pub fn paginated(data: Vec<T>, pagination: Pagination) -> Self {
        Envelope {
            pagination: Some(pagination),
            ..Envelope::counted(data)
        }
    }
}

/// Serializes as `{}`, the payload of a successful delete.
#[derive(Serialize, Debug, Default)]
pub struct Empty {}
