// ABOUTME: Built-in Handlebars helper functions for configuration text
// ABOUTME: Implements environment, timestamp, string, and HCL quoting helpers

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use handlebars::{
    Context, Handlebars, Helper, HelperDef, Output, RenderContext, RenderError,
};
use std::env;

/// Environment variable helper - gets an environment variable with optional default
pub fn env_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let var_name = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("env helper requires variable name parameter"))?;

    let default_value = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

    let value = env::var(var_name).unwrap_or_else(|_| default_value.to_string());
    out.write(&value)?;
    Ok(())
}

/// Timestamp helper - formats current time with optional format string
pub fn timestamp_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let format = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .unwrap_or("%Y-%m-%d %H:%M:%S");

    let formatted = Utc::now().format(format).to_string();
    out.write(&formatted)?;
    Ok(())
}

/// Default helper - provides a fallback when the value is empty
pub fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let value = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");

    let default_value = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("default helper requires default value parameter"))?;

    let result = if value.is_empty() {
        default_value
    } else {
        value
    };

    out.write(result)?;
    Ok(())
}

/// Uppercase helper
pub fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("upper helper requires input parameter"))?;

    out.write(&input.to_uppercase())?;
    Ok(())
}

/// Lowercase helper
pub fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("lower helper requires input parameter"))?;

    out.write(&input.to_lowercase())?;
    Ok(())
}

/// Join helper - joins array elements with a separator
pub fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let array = h
        .param(0)
        .and_then(|v| v.value().as_array())
        .ok_or_else(|| RenderError::new("join helper requires array parameter"))?;

    let separator = h.param(1).and_then(|v| v.value().as_str()).unwrap_or(",");

    let strings: std::result::Result<Vec<String>, RenderError> = array
        .iter()
        .map(|v| {
            v.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| RenderError::new("Array elements must be strings"))
        })
        .collect();

    out.write(&strings?.join(separator))?;
    Ok(())
}

/// Quote helper - renders a value as a quoted HCL string
pub fn quote_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let param = h
        .param(0)
        .ok_or_else(|| RenderError::new("quote helper requires a value parameter"))?;

    let raw = match param.value() {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
    out.write(&format!("\"{}\"", escaped))?;
    Ok(())
}

/// Indent helper - prefixes every line of the input with the given number of spaces
pub fn indent_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let width = h
        .param(0)
        .and_then(|v| v.value().as_u64())
        .ok_or_else(|| RenderError::new("indent helper requires a width parameter"))?;

    let input = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("indent helper requires an input parameter"))?;

    let prefix = " ".repeat(width as usize);
    let indented = input
        .lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n");

    out.write(&indented)?;
    Ok(())
}

/// Base64 encode helper
pub fn base64_encode_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("base64_encode helper requires input parameter"))?;

    out.write(&BASE64.encode(input.as_bytes()))?;
    Ok(())
}

/// Base64 decode helper
pub fn base64_decode_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let input = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("base64_decode helper requires input parameter"))?;

    let decoded_bytes = BASE64
        .decode(input)
        .map_err(|e| RenderError::new(format!("Base64 decode error: {}", e)))?;

    let decoded_str = String::from_utf8(decoded_bytes)
        .map_err(|e| RenderError::new(format!("UTF-8 decode error: {}", e)))?;

    out.write(&decoded_str)?;
    Ok(())
}

/// The built-in helper set, as (name, definition) pairs
pub fn builtin_helpers() -> Vec<(&'static str, Box<dyn HelperDef + Send + Sync>)> {
    let mut helpers: Vec<(&'static str, Box<dyn HelperDef + Send + Sync>)> = Vec::new();
    helpers.push(("env", Box::new(env_helper)));
    helpers.push(("timestamp", Box::new(timestamp_helper)));
    helpers.push(("default", Box::new(default_helper)));
    helpers.push(("upper", Box::new(upper_helper)));
    helpers.push(("lower", Box::new(lower_helper)));
    helpers.push(("join", Box::new(join_helper)));
    helpers.push(("quote", Box::new(quote_helper)));
    helpers.push(("indent", Box::new(indent_helper)));
    helpers.push(("base64_encode", Box::new(base64_encode_helper)));
    helpers.push(("base64_decode", Box::new(base64_decode_helper)));
    helpers
}

/// Register all built-in helpers with a Handlebars instance
pub fn register_helpers(handlebars: &mut Handlebars) {
    for (name, def) in builtin_helpers() {
        handlebars.register_helper(name, def);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handlebars::Handlebars;
    use serde_json::json;

    fn create_test_handlebars() -> Handlebars<'static> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        register_helpers(&mut handlebars);
        handlebars
    }

    #[test]
    fn test_env_helper() {
        std::env::set_var("TFSMITH_TEST_VAR", "test_value");
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template("{{env \"TFSMITH_TEST_VAR\"}}", &json!({}))
            .unwrap();
        assert_eq!(result, "test_value");

        let result_default = handlebars
            .render_template("{{env \"TFSMITH_NONEXISTENT\" \"fallback\"}}", &json!({}))
            .unwrap();
        assert_eq!(result_default, "fallback");
    }

    #[test]
    fn test_timestamp_helper() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template("{{timestamp}}", &json!({}))
            .unwrap();
        assert!(!result.is_empty());

        let year = handlebars
            .render_template("{{timestamp \"%Y\"}}", &json!({}))
            .unwrap();
        assert_eq!(year.len(), 4);
    }

    #[test]
    fn test_default_helper() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template("{{default \"\" \"fallback\"}}", &json!({}))
            .unwrap();
        assert_eq!(result, "fallback");

        let result2 = handlebars
            .render_template("{{default \"value\" \"fallback\"}}", &json!({}))
            .unwrap();
        assert_eq!(result2, "value");
    }

    #[test]
    fn test_case_helpers() {
        let handlebars = create_test_handlebars();
        let upper = handlebars
            .render_template("{{upper \"aws_instance\"}}", &json!({}))
            .unwrap();
        assert_eq!(upper, "AWS_INSTANCE");

        let lower = handlebars
            .render_template("{{lower \"SANDBOX\"}}", &json!({}))
            .unwrap();
        assert_eq!(lower, "sandbox");
    }

    #[test]
    fn test_join_helper() {
        let handlebars = create_test_handlebars();
        let context = json!({"zones": ["eu-west-1a", "eu-west-1b"]});

        let result = handlebars
            .render_template("{{join zones \", \"}}", &context)
            .unwrap();
        assert_eq!(result, "eu-west-1a, eu-west-1b");

        let default_sep = handlebars
            .render_template("{{join zones}}", &context)
            .unwrap();
        assert_eq!(default_sep, "eu-west-1a,eu-west-1b");
    }

    #[test]
    fn test_quote_helper() {
        let handlebars = create_test_handlebars();
        let context = json!({"name": "say \"hi\"", "count": 3});

        let result = handlebars
            .render_template("{{quote name}}", &context)
            .unwrap();
        assert_eq!(result, "\"say \\\"hi\\\"\"");

        let number = handlebars
            .render_template("{{quote count}}", &context)
            .unwrap();
        assert_eq!(number, "\"3\"");
    }

    #[test]
    fn test_indent_helper() {
        let handlebars = create_test_handlebars();
        let context = json!({"body": "a\nb"});

        let result = handlebars
            .render_template("{{indent 2 body}}", &context)
            .unwrap();
        assert_eq!(result, "  a\n  b");
    }

    #[test]
    fn test_base64_helpers() {
        let handlebars = create_test_handlebars();
        let encoded = handlebars
            .render_template("{{base64_encode \"hello world\"}}", &json!({}))
            .unwrap();
        assert_eq!(encoded, "aGVsbG8gd29ybGQ=");

        let template = format!("{{{{base64_decode \"{}\"}}}}", encoded);
        let decoded = handlebars.render_template(&template, &json!({})).unwrap();
        assert_eq!(decoded, "hello world");
    }
}
