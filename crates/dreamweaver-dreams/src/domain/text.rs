//! Display strings derived from player and generator text.

/// Maximum number of characters kept from the seed text in a world title.
pub const TITLE_MAX_CHARS: usize = 40;

/// Number of characters of the scene description kept in a world preview.
pub const PREVIEW_MAX_CHARS: usize = 100;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Builds a world title from the seed text.
///
/// Seeds longer than [`TITLE_MAX_CHARS`] characters are cut and marked with
/// [`ELLIPSIS`]; shorter seeds are used as-is. Whitespace is kept as typed.
#[must_use]
pub fn title_from_seed(seed_text: &str) -> String {
    if seed_text.chars().count() > TITLE_MAX_CHARS {
        let mut title: String = seed_text.chars().take(TITLE_MAX_CHARS).collect();
        title.push_str(ELLIPSIS);
        title
    } else {
        seed_text.to_owned()
    }
}

/// Builds a library preview from a scene description.
///
/// The ellipsis is always appended, even when the scene is shorter than
/// [`PREVIEW_MAX_CHARS`].
#[must_use]
pub fn preview_from_scene(scene_description: &str) -> String {
    let mut preview: String = scene_description.chars().take(PREVIEW_MAX_CHARS).collect();
    preview.push_str(ELLIPSIS);
    preview
}
