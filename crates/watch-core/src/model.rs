use serde_json::Value;

use crate::structural::{
    decode_base64, decode_integer, decode_text, encode_base64, ConversionError, Field, JsonKind, Structural,
};

/// Identifier assigned by the persistence layer.
pub type WatchId = i64;

/// A watch offered by the shop.
///
/// Every field is optional: a candidate produced by decoding or patching may
/// be incomplete, and it is the validator's job to reject it. A persisted
/// watch always carries all four business fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watch {
    /// Absent until the watch has been saved once.
    pub id: Option<WatchId>,
    pub title: Option<String>,
    pub price: Option<i32>,
    pub description: Option<String>,
    /// Raw image bytes of the fountain.
    pub fountain: Option<Vec<u8>>,
}

impl Watch {
    /// Build a watch for creation. The identifier is left absent.
    pub fn new(
        title: impl Into<String>,
        price: i32,
        description: impl Into<String>,
        fountain: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            price: Some(price),
            description: Some(description.into()),
            fountain: Some(fountain.into()),
        }
    }

    pub fn with_id(mut self, id: WatchId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Structural for Watch {
    const FIELDS: &'static [Field<Self>] = &[
        Field { name: "id", kind: JsonKind::Integer, encode: encode_id, decode: decode_id },
        Field { name: "title", kind: JsonKind::String, encode: encode_title, decode: decode_title },
        Field { name: "price", kind: JsonKind::Integer, encode: encode_price, decode: decode_price },
        Field {
            name: "description",
            kind: JsonKind::String,
            encode: encode_description,
            decode: decode_description,
        },
        Field { name: "fountain", kind: JsonKind::Base64, encode: encode_fountain, decode: decode_fountain },
    ];
}

fn encode_id(w: &Watch) -> Option<Value> {
    w.id.map(Value::from)
}

fn decode_id(w: &mut Watch, v: &Value) -> Result<(), ConversionError> {
    w.id = decode_integer("id", v)?;
    Ok(())
}

fn encode_title(w: &Watch) -> Option<Value> {
    w.title.clone().map(Value::String)
}

fn decode_title(w: &mut Watch, v: &Value) -> Result<(), ConversionError> {
    w.title = decode_text("title", v)?;
    Ok(())
}

fn encode_price(w: &Watch) -> Option<Value> {
    w.price.map(Value::from)
}

fn decode_price(w: &mut Watch, v: &Value) -> Result<(), ConversionError> {
    w.price = decode_integer("price", v)?;
    Ok(())
}

fn encode_description(w: &Watch) -> Option<Value> {
    w.description.clone().map(Value::String)
}

fn decode_description(w: &mut Watch, v: &Value) -> Result<(), ConversionError> {
    w.description = decode_text("description", v)?;
    Ok(())
}

fn encode_fountain(w: &Watch) -> Option<Value> {
    w.fountain.as_deref().map(encode_base64)
}

fn decode_fountain(w: &mut Watch, v: &Value) -> Result<(), ConversionError> {
    w.fountain = decode_base64("fountain", v)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_leaves_id_absent() {
        let w = Watch::new("Prim", 250000, "Fountain watch", b"png".to_vec());
        assert_eq!(w.id, None);
        assert_eq!(w.with_id(7).id, Some(7));
    }

    #[test]
    fn field_table_lists_every_member_once() {
        let names: Vec<&str> = Watch::FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, ["id", "title", "price", "description", "fountain"]);
        assert_eq!(Watch::field("fountain").map(|f| f.kind), Some(JsonKind::Base64));
        assert!(Watch::field("links").is_none());
    }
}
