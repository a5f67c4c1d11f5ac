/// The version of the SDK.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BUCKETING_API_URI: &str = "https://bucketing-api.devcycle.com";
pub const SDK_KEY_PREFIXES: [&str; 2] = ["server", "dvc_server"];
pub const EDGE_DB_QUERY_PARAM: &str = "enableEdgeDB";

pub const VARIABLES_PATH: [&str; 2] = ["v1", "variables"];
pub const FEATURES_PATH: [&str; 2] = ["v1", "features"];
pub const TRACK_PATH: [&str; 2] = ["v1", "track"];
