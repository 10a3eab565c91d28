/// Path prefix the provider puts on hosted-zone ids.
pub const HOSTED_ZONE_PREFIX: &str = "/hostedzone/";

/// Path prefix the provider puts on change ids.
pub const CHANGE_PREFIX: &str = "/change/";

/// Appends the trailing dot the provider expects on zone names.
pub fn normalize_zone_name(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Strips a leading `/hostedzone/` so the id can be used as a path segment.
pub fn strip_zone_id(zone_id: &str) -> &str {
    zone_id.strip_prefix(HOSTED_ZONE_PREFIX).unwrap_or(zone_id)
}

/// Strips a leading `/change/` so the id can be used as a path segment.
pub fn strip_change_id(change_id: &str) -> &str {
    change_id.strip_prefix(CHANGE_PREFIX).unwrap_or(change_id)
}
