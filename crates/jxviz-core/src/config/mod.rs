use serde_json::{Map, Value, json};

/// Viewer configuration as a JSON object addressed by dotted paths (`view.showGrid`).
///
/// `ViewerConfig::default()` carries the built-in defaults; user overrides are merged on top
/// with [`ViewerConfig::deep_merge`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig(Value);

impl Default for ViewerConfig {
    fn default() -> Self {
        Self(json!({
            "theme": "light",
            "layout": {
                "orientation": "LeftToRight"
            },
            "view": {
                "showChildCount": true,
                "showExpandCollapse": true,
                "showGrid": true
            },
            "node": {
                "font": "12px Consolas",
                "lineHeight": 16,
                "annotationMargin": 10,
                "expandIconWidth": 36,
                "cornerRadius": 3
            },
            "editor": {
                "mode": "json"
            }
        }))
    }
}

impl ViewerConfig {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Defaults with `overrides` merged on top.
    pub fn with_overrides(overrides: &Value) -> Self {
        let mut config = Self::default();
        config.deep_merge(overrides);
        config
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    /// Writes `value` at `dotted_path`, replacing any non-object found on the way.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let segments = dotted_path.split('.').collect::<Vec<_>>();
        write_path(&mut self.0, &segments, value);
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn write_path(slot: &mut Value, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(map) = slot {
        let child = map.entry(*head).or_insert(Value::Null);
        write_path(child, rest, value);
    }
}

/// Objects merge key by key; any other incoming value replaces what is there.
fn deep_merge_value(base: &mut Value, incoming: &Value) {
    if let (Value::Object(base_map), Value::Object(incoming_map)) = (&mut *base, incoming) {
        for (key, value) in incoming_map {
            match base_map.get_mut(key) {
                Some(existing) => deep_merge_value(existing, value),
                None => {
                    base_map.insert(key.clone(), value.clone());
                }
            }
        }
        return;
    }
    *base = incoming.clone();
}
