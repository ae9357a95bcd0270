//! Layered merge of YAML settings files.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Null values in an overlay delete the key inherited from lower layers
//! - Anything else in the overlay replaces the base value
//! - An empty file (YAML null at the top level) changes nothing

use serde_yaml::Value;

/// Deep merge two YAML values; `overlay` wins at the point of conflict.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (base, Value::Null) => base.clone(),

        (_, overlay) => overlay.clone(),
    }
}

/// Merge layers in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn overlay_replaces_scalar() {
        let base = yaml("kubectl-path: /usr/bin/kubectl\nhelm-path: /usr/bin/helm");
        let overlay = yaml("kubectl-path: /opt/k8s/kubectl");

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["kubectl-path"], "/opt/k8s/kubectl");
        assert_eq!(result["helm-path"], "/usr/bin/helm");
    }

    #[test]
    fn null_removes_inherited_value() {
        let base = yaml("kubeconfig: /home/me/.kube/prod\nhelm-path: /usr/bin/helm");
        let overlay = yaml("kubeconfig: null");

        let result = deep_merge(&base, &overlay);

        assert!(result.get("kubeconfig").is_none());
        assert_eq!(result["helm-path"], "/usr/bin/helm");
    }

    #[test]
    fn empty_file_changes_nothing() {
        let base = yaml("draft-path: /opt/draft/draft");
        let overlay = yaml("");
        assert!(overlay.is_null());

        let result = deep_merge(&base, &overlay);
        assert_eq!(result["draft-path"], "/opt/draft/draft");
    }

    #[test]
    fn nested_mappings_merge_recursively() {
        let base = yaml("a:\n  b: 1\n  c: 2");
        let overlay = yaml("a:\n  b: 10");

        let result = deep_merge(&base, &overlay);
        assert_eq!(result["a"]["b"], 10);
        assert_eq!(result["a"]["c"], 2);
    }

    #[test]
    fn merge_configs_merges_multiple_in_order() {
        let configs = vec![
            yaml("kubectl-path: a\nhelm-path: b"),
            yaml(""),
            yaml("helm-path: c\ndraft-path: d"),
            yaml("draft-path: e"),
        ];

        let result = merge_configs(&configs);

        assert_eq!(result["kubectl-path"], "a");
        assert_eq!(result["helm-path"], "c");
        assert_eq!(result["draft-path"], "e");
    }

    #[test]
    fn merge_empty_configs_returns_empty() {
        let result = merge_configs(&[]);
        assert!(result.as_mapping().unwrap().is_empty());
    }
}
