/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const API_V1_ROUTE_COMPONENT: &str = "v1";
pub const API_V1_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", API_V1_ROUTE_COMPONENT);

/// Weekday abbreviations, Monday first, aligned with weekday bucket indexes.
pub const WEEKDAY_ABBR: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Month abbreviations, January first, aligned with monthly report rows.
pub const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Served when the roster cannot supply protocol, host, or avatar for a user.
pub const DEFAULT_AVATAR_URL: &str =
    "https://www.gravatar.com/avatar/00000000000000000000000000000000?d=mp";
