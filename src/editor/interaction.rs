use super::{Editor, InteractionState, Transient};

impl Editor {
    /// Ends the current gesture: commits its pending history step (if the
    /// document changed) and clears all transient drag state.
    pub(super) fn finish_interaction(&mut self) {
        match self.interaction {
            InteractionState::Idle => {
                self.ignored("finish interaction");
                return;
            }
            InteractionState::MarqueeSelecting => self.finish_marquee(),
            InteractionState::EditingText => self.finish_text_editing(),
            InteractionState::Drawing
            | InteractionState::Moving
            | InteractionState::Resizing
            | InteractionState::Panning => {}
        }
        self.commit_pending();
        self.transient = Transient::default();
        self.interaction = InteractionState::Idle;
    }
}
