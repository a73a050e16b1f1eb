// ABOUTME: AWS resource plugin providing tag lookup for template rendering
// ABOUTME: Contributes the aws_tag helper and the tags_block partial

use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::{Plugin, PluginComponent};

/// Raised when a resource record has no "Tags" collection.
#[derive(Error, Debug)]
#[error("Unable to find \"Tags\" in the object: {object}")]
pub struct MissingTagsError {
    pub object: JsonValue,
}

/// Look up a tag value on a resource record.
///
/// Returns the value for a matching key, `default` when no key matches,
/// and fails with [`MissingTagsError`] when the record has no `Tags`
/// collection, unless `no_tags_ok` suppresses the failure in favor of
/// the default.
pub fn lookup_tag(
    object: &JsonValue,
    key: &str,
    default: &str,
    no_tags_ok: bool,
) -> std::result::Result<String, MissingTagsError> {
    let tags = match object.get("Tags").and_then(JsonValue::as_array) {
        Some(tags) => tags,
        None => {
            if no_tags_ok {
                return Ok(default.to_string());
            }
            return Err(MissingTagsError {
                object: object.clone(),
            });
        }
    };

    for tag in tags {
        if tag.get("Key").and_then(JsonValue::as_str) == Some(key) {
            return Ok(match tag.get("Value") {
                Some(JsonValue::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => default.to_string(),
            });
        }
    }

    Ok(default.to_string())
}

/// aws_tag helper - retrieves a tag value from the given resource record.
///
/// Usage: `{{aws_tag this "Name"}}`, with an optional default as third
/// parameter and `no_tags_ok=true` to tolerate records without tags.
pub fn aws_tag_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let object = h
        .param(0)
        .map(|v| v.value())
        .ok_or_else(|| RenderError::new("aws_tag helper requires a resource object parameter"))?;

    let key = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("aws_tag helper requires a tag key parameter"))?;

    let default = h.param(2).and_then(|v| v.value().as_str()).unwrap_or("");

    let no_tags_ok = h
        .hash_get("no_tags_ok")
        .and_then(|v| v.value().as_bool())
        .unwrap_or(false);

    let value = lookup_tag(object, key, default, no_tags_ok)
        .map_err(|e| RenderError::new(e.to_string()))?;

    out.write(&value)?;
    Ok(())
}

/// Partial rendering a record's tag list as an HCL tags block
const TAGS_BLOCK: &str = r#"tags = {
{{#each Tags}}    {{Key}} = "{{Value}}"
{{/each}}  }"#;

pub struct AwsPlugin;

impl Plugin for AwsPlugin {
    fn name(&self) -> &'static str {
        "aws"
    }

    fn description(&self) -> &'static str {
        "Tag lookup helper and tags block partial for AWS-style resource records"
    }

    fn components(&self) -> Vec<PluginComponent> {
        vec![
            PluginComponent::Helper {
                name: "aws_tag".to_string(),
                def: Box::new(aws_tag_helper),
            },
            PluginComponent::Partial {
                name: "tags_block".to_string(),
                source: TAGS_BLOCK.to_string(),
            },
        ]
    }
}
