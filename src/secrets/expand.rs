//! Generic placeholder expansion over arbitrary configuration shapes.
//!
//! The engine substitutes `${prefix:key}` placeholders in every string
//! reachable from a configuration value, whatever its type. Rust has no
//! runtime reflection to walk arbitrary struct fields, so the traversal
//! round-trips through a generic tree: the target is serialized into
//! [`serde_json::Value`], the substitution pass runs over that tree, and the
//! tree is deserialized back into the typed structure. This keeps the engine
//! total over any `Serialize + DeserializeOwned` shape with no per-type
//! visitors.
//!
//! One depth-first pass per invocation, two outcomes: success (every
//! placeholder resolved) or failure (the first unresolved placeholder aborts
//! the traversal). There is no caching and no retry; each placeholder
//! occurrence triggers an independent backend call.

use futures::future::BoxFuture;
use futures::FutureExt;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::{Result, SecretsError};
use super::registry::ResolverRegistry;

/// Matches `${...}` with a non-empty inner token. An unterminated `${` or an
/// empty `${}` is not a placeholder and is left verbatim.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder regex is valid"));

/// Expand every `${...}` placeholder reachable from `target`, in place.
///
/// Strings without placeholders are left untouched. `Option::None` fields
/// serialize to `Null` and are skipped silently. The first resolution error
/// anywhere aborts the whole traversal and is returned to the caller; nodes
/// visited strictly before the failing one may already be mutated.
pub async fn expand_variables<T>(registry: &ResolverRegistry, target: &mut T) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let mut tree = serde_json::to_value(&*target)
        .map_err(|e| SecretsError::unsupported_shape(e.to_string()))?;

    expand_value(registry, &mut tree).await?;

    *target = serde_json::from_value(tree)
        .map_err(|_| SecretsError::RoundTrip { type_name: std::any::type_name::<T>().to_string() })?;

    Ok(())
}

/// Expand placeholders in one string, returning `None` when untouched.
pub async fn expand_string(registry: &ResolverRegistry, input: &str) -> Result<Option<String>> {
    let spans: Vec<(usize, usize, &str)> = PLACEHOLDER
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let token = caps.get(1)?;
            Some((whole.start(), whole.end(), token.as_str()))
        })
        .collect();

    if spans.is_empty() {
        return Ok(None);
    }

    let mut output = String::with_capacity(input.len());
    let mut last = 0;
    for (start, end, token) in spans {
        output.push_str(&input[last..start]);
        let resolved = registry.resolve(token).await?;
        output.push_str(resolved.expose_secret());
        last = end;
    }
    output.push_str(&input[last..]);

    Ok(Some(output))
}

/// Depth-first walk of the generic tree.
///
/// Objects cover both structs and maps (every member value is visited, key
/// set untouched); arrays cover slices, in place by index. Null, booleans,
/// and numbers carry no strings and are no-ops.
fn expand_value<'a>(
    registry: &'a ResolverRegistry,
    value: &'a mut Value,
) -> BoxFuture<'a, Result<()>> {
    async move {
        match value {
            Value::String(s) => {
                if let Some(expanded) = expand_string(registry, s).await? {
                    *s = expanded;
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    expand_value(registry, item).await?;
                }
            }
            Value::Object(members) => {
                for (_, member) in members.iter_mut() {
                    expand_value(registry, member).await?;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
        Ok(())
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::resolvers::SecretResolver;
    use crate::secrets::types::SecretString;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Echoes `<key>!` so substitutions are observable without a backend.
    #[derive(Debug)]
    struct EchoResolver;

    #[async_trait]
    impl SecretResolver for EchoResolver {
        async fn resolve(&self, key: &str) -> Result<SecretString> {
            Ok(SecretString::new(format!("{}!", key)))
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    fn echo_registry() -> ResolverRegistry {
        let registry = ResolverRegistry::new();
        registry.register("echo", Arc::new(EchoResolver));
        registry
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Nested {
        password: String,
        label: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Root {
        name: String,
        port: u16,
        enabled: bool,
        nested: Nested,
        missing: Option<Nested>,
        hosts: Vec<String>,
        extras: HashMap<String, String>,
    }

    fn sample() -> Root {
        let mut extras = HashMap::new();
        extras.insert("a".to_string(), "${echo:ea}".to_string());
        extras.insert("b".to_string(), "plain".to_string());

        Root {
            name: "svc-${echo:n}".to_string(),
            port: 8080,
            enabled: true,
            nested: Nested { password: "${echo:pw}".to_string(), label: None },
            missing: None,
            hosts: vec!["${echo:h1}".to_string(), "static".to_string()],
            extras,
        }
    }

    #[tokio::test]
    async fn test_expands_nested_struct_fields() {
        let registry = echo_registry();
        let mut root = sample();

        expand_variables(&registry, &mut root).await.unwrap();

        assert_eq!(root.name, "svc-n!");
        assert_eq!(root.nested.password, "pw!");
        assert_eq!(root.hosts, vec!["h1!".to_string(), "static".to_string()]);
        assert_eq!(root.port, 8080);
        assert!(root.enabled);
    }

    #[tokio::test]
    async fn test_none_fields_stay_none_without_panicking() {
        let registry = echo_registry();
        let mut root = sample();

        expand_variables(&registry, &mut root).await.unwrap();

        assert!(root.missing.is_none());
        assert!(root.nested.label.is_none());
    }

    #[tokio::test]
    async fn test_map_values_expanded_keys_and_size_preserved() {
        let registry = echo_registry();
        let mut root = sample();

        expand_variables(&registry, &mut root).await.unwrap();

        assert_eq!(root.extras.len(), 2);
        assert_eq!(root.extras.get("a").map(String::as_str), Some("ea!"));
        assert_eq!(root.extras.get("b").map(String::as_str), Some("plain"));
    }

    #[tokio::test]
    async fn test_noop_on_strings_without_placeholders() {
        let registry = echo_registry();
        let mut value = "no placeholders here".to_string();

        expand_variables(&registry, &mut value).await.unwrap();
        assert_eq!(value, "no placeholders here");

        let untouched = expand_string(&registry, "still nothing").await.unwrap();
        assert!(untouched.is_none());
    }

    #[tokio::test]
    async fn test_multiple_placeholders_in_one_string() {
        let registry = echo_registry();
        let expanded =
            expand_string(&registry, "${echo:a}-${echo:b}").await.unwrap().unwrap();
        assert_eq!(expanded, "a!-b!");
    }

    #[tokio::test]
    async fn test_placeholder_key_may_contain_colons() {
        let registry = echo_registry();
        let expanded = expand_string(&registry, "${echo:db:password}").await.unwrap().unwrap();
        assert_eq!(expanded, "db:password!");
    }

    #[tokio::test]
    async fn test_unterminated_and_empty_tokens_left_verbatim() {
        let registry = echo_registry();

        assert!(expand_string(&registry, "tail ${echo:a").await.unwrap().is_none());
        assert!(expand_string(&registry, "empty ${}").await.unwrap().is_none());

        let mixed = expand_string(&registry, "${echo:a} ${rest").await.unwrap().unwrap();
        assert_eq!(mixed, "a! ${rest");
    }

    #[tokio::test]
    async fn test_fail_fast_on_unknown_prefix() {
        let registry = echo_registry();
        let mut root = sample();
        root.nested.password = "${vault:pw}".to_string();

        let err = expand_variables(&registry, &mut root).await.unwrap_err();
        assert!(err.to_string().contains("vault"));
    }

    #[tokio::test]
    async fn test_scalars_and_null_are_noops() {
        let registry = echo_registry();

        let mut n = 42u32;
        expand_variables(&registry, &mut n).await.unwrap();
        assert_eq!(n, 42);

        let mut b = true;
        expand_variables(&registry, &mut b).await.unwrap();
        assert!(b);

        let mut none: Option<String> = None;
        expand_variables(&registry, &mut none).await.unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_deeply_nested_collections() {
        let registry = echo_registry();
        let mut value: Vec<HashMap<String, Vec<String>>> = vec![HashMap::from([(
            "inner".to_string(),
            vec!["${echo:deep}".to_string()],
        )])];

        expand_variables(&registry, &mut value).await.unwrap();
        assert_eq!(value[0]["inner"][0], "deep!");
    }

    #[tokio::test]
    async fn test_round_trip_failure_names_type_only() {
        // A constrained field whose expanded value no longer deserializes
        // fails the round trip; the error names the type, never the value.
        #[derive(Debug, Serialize)]
        struct Scheme(String);

        impl<'de> Deserialize<'de> for Scheme {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                if s == "http" || s == "https" {
                    Ok(Scheme(s))
                } else {
                    Err(serde::de::Error::custom("scheme must be http or https"))
                }
            }
        }

        #[derive(Debug, Serialize, Deserialize)]
        struct Endpoint {
            scheme: Scheme,
        }

        let registry = echo_registry();
        let mut endpoint = Endpoint { scheme: Scheme("${echo:scheme}".to_string()) };

        let err = expand_variables(&registry, &mut endpoint).await.unwrap_err();
        match err {
            SecretsError::RoundTrip { ref type_name } => {
                assert!(type_name.contains("Endpoint"));
            }
            other => panic!("expected RoundTrip error, got {:?}", other),
        }
        // The substituted value must not leak through the error.
        assert!(!err.to_string().contains("scheme!"));
    }
}
