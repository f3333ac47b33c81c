use mongodb::bson::{oid::ObjectId, Bson};

/// Identifier taken from a request path.
///
/// A 24-hex string is a native ObjectId; anything else is looked up as a raw
/// string key, which is how records imported with string ids are addressed.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordId {
    Native(ObjectId),
    Raw(String),
}

impl RecordId {
    pub fn parse(id: &str) -> Self {
        match ObjectId::parse_str(id) {
            Ok(oid) => RecordId::Native(oid),
            Err(_) => RecordId::Raw(id.to_string()),
        }
    }
}

impl From<RecordId> for Bson {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Native(oid) => Bson::ObjectId(oid),
            RecordId::Raw(s) => Bson::String(s),
        }
    }
}
