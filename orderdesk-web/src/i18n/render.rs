use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

/// English and Italian share the same two-way plural split.
fn plural_category(count: &str) -> &'static str {
    match count.trim().parse::<f64>() {
        Ok(n) if (n - 1.0).abs() < f64::EPSILON => "one",
        _ => "other",
    }
}

fn render_message(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let category = args
                .and_then(|m| m.get("count"))
                .map_or("other", |count| plural_category(count));
            map.get(category)
                .or_else(|| map.get("other"))
                .and_then(Value::as_str)?
                .to_string()
        }
        _ => return None,
    };

    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_message(v, args))
            .or_else(|| get_nested_value(&bundle.fallback, key).and_then(|v| render_message(v, args)))
    })
}

/// Translate a key to the current language, falling back to English and then
/// to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key, replacing `{name}` placeholders from `args`. A `count`
/// argument selects between `one` and `other` forms.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_forms_follow_count() {
        let value: Value =
            serde_json::from_str(r#"{"one": "{count} item", "other": "{count} items"}"#).unwrap();
        let mut args = BTreeMap::new();
        args.insert("count", "1");
        assert_eq!(render_message(&value, Some(&args)).unwrap(), "1 item");
        args.insert("count", "3");
        assert_eq!(render_message(&value, Some(&args)).unwrap(), "3 items");
        assert_eq!(render_message(&value, None).unwrap(), "{count} items");
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        crate::i18n::set_lang("it");
        assert_eq!(t("price_list.empty"), "Nessun prodotto disponibile");
        assert_eq!(t("no.such.key"), "no.such.key");
        crate::i18n::set_lang("en");
        assert_eq!(t("validation.quantity"), "Enter a valid quantity greater than zero.");
    }
}
