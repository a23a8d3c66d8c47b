/// What the section currently shows: the last index reported by the engine
/// and whether autoplay is believed to be running.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SelectionState {
    pub selected_index: usize,
    pub is_playing: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_index: 0, // Meaningless until the engine reports
            is_playing: true,
        }
    }
}
