//! Friendly region names
//!
//! Lets users write `--region frankfurt` instead of `eu-central-1`. Unknown
//! names pass through untouched so any provider region code still works.

/// Friendly name to region code
pub const REGIONS: &[(&str, &str)] = &[
    ("n-virginia", "us-east-1"),
    ("ohio", "us-east-2"),
    ("n-california", "us-west-1"),
    ("oregon", "us-west-2"),
    ("mumbai", "ap-south-1"),
    ("seoul", "ap-northeast-2"),
    ("singapore", "ap-southeast-1"),
    ("sydney", "ap-southeast-2"),
    ("tokyo", "ap-northeast-1"),
    ("canada", "ca-central-1"),
    ("frankfurt", "eu-central-1"),
    ("ireland", "eu-west-1"),
    ("london", "eu-west-2"),
    ("paris", "eu-west-3"),
    ("sao-paulo", "sa-east-1"),
];

/// Region that rejects an explicit bucket location constraint
pub const DEFAULT_REGION: &str = "us-east-1";

/// Resolve a friendly region name or pass a region code through
pub fn resolve_region(name: &str) -> String {
    let wanted = name.trim().to_ascii_lowercase().replace('_', "-");
    REGIONS
        .iter()
        .find(|(friendly, _)| *friendly == wanted)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or_else(|| name.trim().to_string())
}
