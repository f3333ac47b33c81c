// Rendering of stored documents as plain JSON.
//
// Extended JSON would wrap ids and dates (`{"$oid": ..}`, `{"$date": ..}`);
// clients of this API expect bare strings instead.

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    let map: Map<String, Value> = doc
        .into_iter()
        .map(|(k, v)| (k, bson_to_json(v)))
        .collect();
    Value::Object(map)
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

/// serde helper for result descriptors that carry a store id.
pub fn serialize_bson<S>(value: &Bson, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serde::Serialize::serialize(&bson_to_json(value.clone()), serializer)
}

pub fn serialize_opt_bson<S>(value: &Option<Bson>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let json = value.clone().map(bson_to_json).unwrap_or(Value::Null);
    serde::Serialize::serialize(&json, serializer)
}
