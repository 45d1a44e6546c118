// Shared prompt constants.
// Feature-specific prompt text lives in a prompts.rs next to the feature.

/// Reviewer persona sent as the system message on every critique call.
pub const REVIEWER_SYSTEM: &str =
    "You are an expert resume reviewer with millions of years in reviewing resumes.";
