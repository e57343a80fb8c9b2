// Shared prompt fragments.
// Each stage keeps its own prompts in screening/prompts.rs; this file holds
// the cross-cutting pieces.

/// Appended to every stage prompt. Missing facts must come back as null or
/// an empty list, never guessed.
pub const NO_GUESSING_INSTRUCTION: &str = "\
    If a field is not supported by the input, return null for text fields \
    and [] for list fields. Do NOT infer, interpolate, or invent details.";
