use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{FieldKind, UIChoice, specs_for_kind};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

struct KindItem<K> {
    kind: K,
    text: String,
}

impl<K> Display for KindItem<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

fn kind_items<K>() -> Vec<KindItem<K>>
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            let desc = k.get_detailed_message().unwrap_or("");
            let text = if desc.is_empty() {
                label.to_string()
            } else {
                format!("{label}  {DIM_ITALIC}{desc}{RESET}")
            };
            KindItem { kind: k, text }
        })
        .collect()
}

/// Walks the user through one choice enum: select a variant, then fill in
/// its schema-described parameters field by field.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let items = kind_items::<C::Kind>();

    let mut select = inquire::Select::new(C::prompt_label(), items);
    if let Some(help) = C::prompt_help() {
        select = select.with_help_message(help);
    }

    let choice_kind: C::Kind = select.prompt()?.kind;
    let key: &'static str = choice_kind.into();
    let specs = specs_for_kind(&C::schema(), key)?;
    let defaults = C::default_params(choice_kind);

    let mut params = Map::new();
    for s in specs {
        let init = s.default.clone().or_else(|| defaults.get(&s.name).cloned());
        let help = s.description.as_deref().unwrap_or("");

        // Optional numeric fields (Option<u64> / Option<f64>) accept an
        // empty answer meaning "none".
        let is_optional_numeric = !s.required
            && matches!(s.kind, FieldKind::Integer | FieldKind::Number)
            && matches!(init, None | Some(Value::Null));

        let answered: Option<Value> = if is_optional_numeric {
            let answer = driver.ask_string(&s.title, &format!("{help}\n(leave blank for none)"), "")?;
            let answer = answer.trim();
            if answer.is_empty() {
                None
            } else {
                Some(match s.kind {
                    FieldKind::Integer => {
                        let n: u64 = answer
                            .parse()
                            .with_context(|| format!("invalid integer for {}", s.title))?;
                        Value::from(n)
                    }
                    FieldKind::Number => {
                        let x: f64 = answer
                            .parse()
                            .with_context(|| format!("invalid number for {}", s.title))?;
                        Value::from(x)
                    }
                    _ => unreachable!(),
                })
            }
        } else {
            Some(match s.kind {
                FieldKind::Boolean => {
                    let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
                    Value::Bool(driver.ask_bool(&s.title, help, def)?)
                }
                FieldKind::String => {
                    let def = init
                        .and_then(|v| v.as_str().map(str::to_string))
                        .unwrap_or_default();
                    let answered = if s.name == "path" {
                        let path_help = if help.is_empty() {
                            "Please type a valid .arff file path"
                        } else {
                            help
                        };
                        prompt_path_until_ok(driver, &s.title, path_help, &def, &["arff"])?
                            .to_string_lossy()
                            .into_owned()
                    } else {
                        driver.ask_string(&s.title, help, &def)?
                    };
                    Value::String(answered)
                }
                FieldKind::Integer => {
                    let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
                    Value::from(driver.ask_u64(
                        &s.title,
                        help,
                        def,
                        s.min.map(|x| x as u64),
                        s.max.map(|x| x as u64),
                    )?)
                }
                FieldKind::Number => {
                    let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
                    Value::from(driver.ask_f64(&s.title, help, def, s.min, s.max)?)
                }
            })
        };

        if let Some(val) = answered {
            params.insert(s.name.clone(), val);
        }
    }

    if let Some(extra) = C::subprompts(driver, choice_kind)? {
        params.extend(extra);
    }
    C::from_parts(choice_kind, Value::Object(params))
}

fn validate_path_str(input: &str, allowed_exts: &[&str]) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    if !allowed_exts.is_empty() {
        match p.extension().and_then(|e| e.to_str()) {
            Some(ext) if allowed_exts.iter().any(|e| e.eq_ignore_ascii_case(ext)) => {}
            _ => return Err(format!("Expected a .{} file", allowed_exts.join(" / ."))),
        }
    }
    Ok(())
}

fn prompt_path_until_ok<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
    allowed_exts: &[&str],
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_path_str(&answer, allowed_exts) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => {
                eprintln!("✗ {msg}");
            }
        }
    }
}
