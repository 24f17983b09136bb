//! HAL+JSON rendering.
//!
//! The document is encoded with `serde_json`, which leaves non-ASCII text
//! and forward slashes unescaped.

use crate::error::Result;
use crate::serializer::{HAL_JSON_MEDIA_TYPE, HalSerializer, Renderer};
use crate::transformer::HalTransformer;
use serde::Serialize;
use serde_json::Value;

/// Renders documents as compact or pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Renderer for JsonRenderer {
    fn media_type(&self) -> &'static str {
        HAL_JSON_MEDIA_TYPE
    }

    fn render(&self, document: &Value) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(document)?)
        } else {
            Ok(serde_json::to_string(document)?)
        }
    }
}

/// Serializer producing HAL+JSON.
pub type HalJsonSerializer = HalSerializer<JsonRenderer>;

/// Serialize a value to a HAL+JSON string.
///
/// # Examples
///
/// ```
/// use helios_hal::json::to_hal_json_string;
/// use helios_hal::{HalTransformer, Mapper, Mapping};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct Post {
///     post_id: u32,
///     title: String,
/// }
///
/// let transformer = HalTransformer::new(
///     Mapper::new().with(Mapping::new("Post", "/post/{postId}", ["postId"])),
/// );
/// let json = to_hal_json_string(&Post { post_id: 1, title: "Hi".into() }, &transformer)?;
/// assert_eq!(json, r#"{"post_id":1,"title":"Hi","_links":{"self":{"href":"/post/1"}}}"#);
/// # Ok::<(), helios_hal::HalError>(())
/// ```
pub fn to_hal_json_string<T>(value: &T, transformer: &HalTransformer) -> Result<String>
where
    T: Serialize + ?Sized,
{
    HalSerializer::new(transformer.clone(), JsonRenderer::new()).serialize(value)
}

/// Serialize a value to a pretty-printed HAL+JSON string.
pub fn to_hal_json_string_pretty<T>(value: &T, transformer: &HalTransformer) -> Result<String>
where
    T: Serialize + ?Sized,
{
    HalSerializer::new(transformer.clone(), JsonRenderer::pretty()).serialize(value)
}

/// Transform a value into a HAL document without encoding it.
pub fn to_hal_json_value<T>(value: &T, transformer: &HalTransformer) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    transformer.transform(crate::node::to_node(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_leaves_unicode_and_slashes() -> Result<()> {
        let document = json!({"name": "Nil Portugués Calderó", "href": "http://example.com/a/b"});
        assert_eq!(
            JsonRenderer::new().render(&document)?,
            r#"{"name":"Nil Portugués Calderó","href":"http://example.com/a/b"}"#
        );
        Ok(())
    }

    #[test]
    fn test_pretty() -> Result<()> {
        let output = JsonRenderer::pretty().render(&json!({"a": 1}))?;
        assert_eq!(output, "{\n  \"a\": 1\n}");
        Ok(())
    }
}
