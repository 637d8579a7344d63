use anyhow::{Context, Result, anyhow, bail};
use schemars::Schema;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

/// One promptable parameter, extracted from a choice enum's JSON Schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Collects the `params` field specs of the tagged-enum branch whose
/// discriminant equals `kind_key`.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let branches = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(|v| v.as_array())
        .context("missing oneOf/anyOf")?;

    for branch in branches {
        let props = match branch
            .as_object()
            .and_then(|b| b.get("properties"))
            .and_then(|v| v.as_object())
        {
            Some(p) => p,
            None => continue,
        };
        if !discriminant_matches(props, kind_key) {
            continue;
        }

        let Some(params) = props.get("params").and_then(|v| v.as_object()) else {
            return Ok(vec![]);
        };
        let Some(params) = resolve_local_ref(root_obj, params) else {
            return Ok(vec![]);
        };
        let Some(fields) = params.get("properties").and_then(|v| v.as_object()) else {
            return Ok(vec![]);
        };

        let required: Vec<&str> = params
            .get("required")
            .and_then(|v| v.as_array())
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut out = Vec::new();
        for (name, field_schema) in fields {
            let mut field = field_schema
                .as_object()
                .context("field schema is not an object")?;
            if field.contains_key("$ref") {
                field = resolve_local_ref(root_obj, field)
                    .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;
            }

            // fields without a promptable scalar type (nested choices,
            // schemars(skip)) are collected by subprompts instead
            let Some(kind) = detect_field_kind(field.get("type")) else {
                continue;
            };

            out.push(FieldSpec {
                name: name.clone(),
                title: field
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or(name)
                    .to_string(),
                description: field
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                required: required.contains(&name.as_str()),
                kind,
                default: field.get("default").cloned(),
                min: field
                    .get("minimum")
                    .or_else(|| field.get("exclusiveMinimum"))
                    .and_then(Value::as_f64),
                max: field
                    .get("maximum")
                    .or_else(|| field.get("exclusiveMaximum"))
                    .and_then(Value::as_f64),
            });
        }
        return Ok(out);
    }

    bail!("no branch found for type={kind_key}");
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tobj) = props.get("type").and_then(|v| v.as_object()) else {
        return false;
    };
    if tobj.get("const").and_then(Value::as_str) == Some(kind_key) {
        return true;
    }
    matches!(
        tobj.get("enum").and_then(|v| v.as_array()),
        Some(arr) if arr.len() == 1 && arr[0].as_str() == Some(kind_key)
    )
}

/// Resolve a local $ref like "#/$defs/MknnParams" against the root object.
/// Objects without a $ref pass through unchanged.
fn resolve_local_ref<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    let scalar = |s: &str| match s {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    };
    match ty {
        Some(Value::String(s)) => scalar(s),
        // unions like ["integer","null"] for Option<T>
        Some(Value::Array(arr)) => arr.iter().filter_map(Value::as_str).find_map(scalar),
        _ => None,
    }
}
