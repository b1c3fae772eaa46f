/// Hue derived from a bird's identity, so each individual keeps a stable
/// color across frames.
///
/// Hashes only the first character, matching the service's long-running
/// visuals. Low entropy when many ids share a prefix; swap in a full-string
/// hash here if distribution ever matters.
pub fn bird_hue(id: &str) -> f64 {
    let code = id.chars().next().map_or(0, |c| c as u32);
    f64::from((code * 137) % 360)
}

/// CSS color string for a bird glyph
pub fn bird_color(id: &str) -> String {
    format!("hsl({}, 80%, 60%)", bird_hue(id))
}
