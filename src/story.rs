//! Mission briefing shown before the first run

/// Briefing slides, in order
pub const STORY_SLIDES: [&str; 4] = [
    "A large group of asteroids were detected heading towards Earth.",
    "It is believed that it came from the past explosion 10 years ago during a mining operation in the asteroid belt.",
    "Hundreds of drones were launched into space for a one-way mission to reduce their numbers. Hundreds of drone pilots were commissioned and you're gonna be one of them.",
    "With the sole purpose of the mission of reducing the asteroid's numbers, it is guaranteed that the drone will be overwhelmed and be destroyed. Just do your best to take out as many as you can.",
];

/// Position within the briefing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryProgress {
    pub slide: usize,
    /// Replayed from the menu (no skip, returns to menu when done)
    pub replay: bool,
}

impl StoryProgress {
    pub fn first_run() -> Self {
        Self {
            slide: 0,
            replay: false,
        }
    }

    pub fn replay() -> Self {
        Self {
            slide: 0,
            replay: true,
        }
    }

    pub fn current_text(&self) -> &'static str {
        STORY_SLIDES.get(self.slide).copied().unwrap_or("")
    }

    pub fn is_last(&self) -> bool {
        self.slide + 1 >= STORY_SLIDES.len()
    }

    /// Label for the advance button
    pub fn next_label(&self) -> &'static str {
        match (self.is_last(), self.replay) {
            (false, _) => "Next",
            (true, false) => "Begin",
            (true, true) => "Exit",
        }
    }

    pub fn can_skip(&self) -> bool {
        !self.replay
    }

    /// Move to the next slide. Returns true once past the last one.
    pub fn advance(&mut self) -> bool {
        self.slide += 1;
        self.slide >= STORY_SLIDES.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_through_slides() {
        let mut story = StoryProgress::first_run();
        assert_eq!(story.current_text(), STORY_SLIDES[0]);
        assert_eq!(story.next_label(), "Next");
        assert!(!story.advance());
        assert!(!story.advance());
        assert!(!story.advance());
        assert!(story.is_last());
        assert_eq!(story.next_label(), "Begin");
        assert!(story.advance());
        assert_eq!(story.current_text(), "");
    }

    #[test]
    fn test_replay_has_no_skip() {
        let mut story = StoryProgress::replay();
        assert!(!story.can_skip());
        story.slide = STORY_SLIDES.len() - 1;
        assert_eq!(story.next_label(), "Exit");
        assert!(StoryProgress::first_run().can_skip());
    }
}
