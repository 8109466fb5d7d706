//! Pre/post hook resolution
//!
//! Hooks exist at two scopes, global and per-destination. Destination
//! hooks run inside the global bracket: general setup first, then
//! destination setup; destination teardown first, then general teardown.

use crate::config::{Destination, GlobalConfig};

/// Concatenate global and destination hook lists.
///
/// Returns `(pre_hooks, post_hooks)`: pre hooks are global-first,
/// post hooks destination-first. No deduplication.
pub fn resolve_hooks(
    global: &GlobalConfig,
    destination: &Destination,
) -> (Vec<String>, Vec<String>) {
    let pre_hooks = [global.pre_hooks.as_slice(), destination.pre_hooks.as_slice()].concat();
    let post_hooks = [destination.post_hooks.as_slice(), global.post_hooks.as_slice()].concat();
    (pre_hooks, post_hooks)
}
