//! User intents forwarded by a presentation surface.

use serde::{Deserialize, Serialize};

/// An action requested by the viewer's user.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerIntent {
    Close,
    TogglePlayPause,
    ToggleLike,
    ToggleMute,
    NextStory,
    PrevStory,
    Share,
    /// A tap on the story surface, resolved through [`TapZone::intent`].
    Tap(TapZone),
}

/// Vertical region of the story surface a tap landed in.
///
/// Top third goes back a story, bottom third goes forward, the middle does
/// nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapZone {
    Upper,
    Middle,
    Lower,
}

impl TapZone {
    /// Classify a tap by its position, `0.0` at the top edge and `1.0` at
    /// the bottom.
    pub fn from_vertical_fraction(fraction: f32) -> Self {
        if fraction < 1.0 / 3.0 {
            TapZone::Upper
        } else if fraction > 2.0 / 3.0 {
            TapZone::Lower
        } else {
            TapZone::Middle
        }
    }

    pub fn intent(self) -> Option<ViewerIntent> {
        match self {
            TapZone::Upper => Some(ViewerIntent::PrevStory),
            TapZone::Lower => Some(ViewerIntent::NextStory),
            TapZone::Middle => None,
        }
    }
}
