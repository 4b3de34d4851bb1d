//! Context strings handed to the narrative generator.

/// Context used for the opening turn of a new world.
pub const NEW_DREAM_CONTEXT: &str = "New Dream Started";

/// Context for continuing a world: the current scene and the option taken.
#[must_use]
pub fn choice_context(scene_description: &str, choice: &str) -> String {
    format!("Current Situation: {scene_description}\nPlayer Choice: {choice}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_context_names_scene_and_choice() {
        let context = choice_context("A bridge of moths.", "Cross it");

        assert_eq!(
            context,
            "Current Situation: A bridge of moths.\nPlayer Choice: Cross it"
        );
    }
}
