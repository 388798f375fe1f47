use serde::{Deserialize, Serialize};

/// Closed set of shelving genres; anything outside it fails
/// deserialization at the request boundary.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    Fiction,
    Romance,
    Comedy,
    Adventure,
    SelfImprovement,
    Drama,
}

/// A catalogued book. `book_id` is assigned by the store on creation and
/// survives persist/reload verbatim. Field order here is the wire and
/// persisted order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub name: String,
    pub genre: Genre,
    pub price: f64,
    pub book_id: String,
}

/// Untrusted input shape for create/update. A caller-supplied `book_id`
/// is accepted and ignored; the store owns id assignment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BookDraft {
    pub name: String,
    pub genre: Genre,
    pub price: f64,
    #[serde(default)]
    pub book_id: Option<String>,
}
