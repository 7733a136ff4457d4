/// Synonym keys a model may use for the summary field, in priority order.
pub const SUMMARY_KEYS: &[&str] = &[
    "summary",
    "executive_summary",
    "overview",
    "meeting_summary",
];

/// Synonym keys a model may use for the key-points field, in priority order.
pub const KEY_POINT_KEYS: &[&str] = &[
    "key_points",
    "keypoints",
    "highlights",
    "main_points",
    "takeaways",
    "bullet_points",
];
