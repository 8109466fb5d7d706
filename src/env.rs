//! Hook environment derivation
//!
//! Hooks receive `DEPLOY_*` variables describing the resolved destination,
//! overlaid with custom `env` entries from the global and destination
//! scopes. Pure derivation; actually exporting the variables into a child
//! process is the executor's job.

use std::collections::BTreeMap;

use crate::config::{Destination, GlobalConfig};
use crate::uri::parse_dest;

/// Fully resolved hook environment. Ordered so iteration (and anything
/// spawned with it) is deterministic.
pub type ResolvedEnv = BTreeMap<String, String>;

/// Derive the hook environment from the selected destination and the
/// merged `dest` string.
///
/// Reserved keys are only set when the corresponding part exists;
/// `DEPLOY_DEST` and `DEPLOY_DEST_DIR` are always present. Custom entries
/// overlay in scope order, destination winning on key collisions.
pub fn derive_env(global: &GlobalConfig, destination: &Destination, dest: &str) -> ResolvedEnv {
    let parsed = parse_dest(dest);
    let mut env = ResolvedEnv::new();

    if let Some(alias) = &destination.alias {
        env.insert("DEPLOY_ALIAS".to_string(), alias.clone());
    }
    if let Some(name) = &destination.name {
        env.insert("DEPLOY_NAME".to_string(), name.clone());
    }
    env.insert("DEPLOY_DEST".to_string(), dest.to_string());
    if let Some(protocol) = parsed.protocol {
        env.insert("DEPLOY_DEST_PROTOCOL".to_string(), protocol);
    }
    if let Some(user) = parsed.user {
        env.insert("DEPLOY_DEST_USER".to_string(), user);
    }
    if let Some(host) = parsed.host {
        env.insert("DEPLOY_DEST_HOST".to_string(), host);
    }
    env.insert("DEPLOY_DEST_DIR".to_string(), parsed.directory);

    for (key, value) in &global.env {
        env.insert(key.clone(), value.clone());
    }
    for (key, value) in &destination.env {
        env.insert(key.clone(), value.clone());
    }

    env
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keys_from_uri_parts() {
        let destination = Destination {
            alias: Some("prod".to_string()),
            name: Some("Production".to_string()),
            ..Destination::default()
        };

        let env = derive_env(
            &GlobalConfig::default(),
            &destination,
            "ssh://deploy@example.com:/srv/www",
        );

        assert_eq!(env.get("DEPLOY_ALIAS").unwrap(), "prod");
        assert_eq!(env.get("DEPLOY_NAME").unwrap(), "Production");
        assert_eq!(env.get("DEPLOY_DEST").unwrap(), "ssh://deploy@example.com:/srv/www");
        assert_eq!(env.get("DEPLOY_DEST_PROTOCOL").unwrap(), "ssh");
        assert_eq!(env.get("DEPLOY_DEST_USER").unwrap(), "deploy");
        assert_eq!(env.get("DEPLOY_DEST_HOST").unwrap(), "example.com");
        assert_eq!(env.get("DEPLOY_DEST_DIR").unwrap(), "/srv/www");
    }

    #[test]
    fn absent_parts_stay_absent() {
        let env = derive_env(&GlobalConfig::default(), &Destination::default(), "./temp");

        assert!(!env.contains_key("DEPLOY_ALIAS"));
        assert!(!env.contains_key("DEPLOY_NAME"));
        assert!(!env.contains_key("DEPLOY_DEST_PROTOCOL"));
        assert!(!env.contains_key("DEPLOY_DEST_USER"));
        assert!(!env.contains_key("DEPLOY_DEST_HOST"));
        assert_eq!(env.get("DEPLOY_DEST").unwrap(), "./temp");
        assert_eq!(env.get("DEPLOY_DEST_DIR").unwrap(), "./temp");
    }

    #[test]
    fn destination_env_wins_over_global_env() {
        let global = GlobalConfig {
            env: [
                ("NODE_ENV".to_string(), "staging".to_string()),
                ("KEEP".to_string(), "global".to_string()),
            ]
            .into_iter()
            .collect(),
            ..GlobalConfig::default()
        };
        let destination = Destination {
            env: [("NODE_ENV".to_string(), "production".to_string())]
                .into_iter()
                .collect(),
            ..Destination::default()
        };

        let env = derive_env(&global, &destination, "host:/srv");

        assert_eq!(env.get("NODE_ENV").unwrap(), "production");
        assert_eq!(env.get("KEEP").unwrap(), "global");
    }

    #[test]
    fn custom_env_can_shadow_reserved_keys() {
        let destination = Destination {
            env: [("DEPLOY_DEST_HOST".to_string(), "other".to_string())]
                .into_iter()
                .collect(),
            ..Destination::default()
        };

        let env = derive_env(&GlobalConfig::default(), &destination, "host:/srv");
        assert_eq!(env.get("DEPLOY_DEST_HOST").unwrap(), "other");
    }
}
