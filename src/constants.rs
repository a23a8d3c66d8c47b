pub const WINDOW_WIDTH: i32 = 1280;           // Default window width
pub const WINDOW_HEIGHT: i32 = 900;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const AUTOPLAY_DELAY_MS: u64 = 5000;      // Time each slide stays selected while autoplaying
pub const SLIDE_SIZE: f32 = 0.9;              // Slide width as a fraction of the viewport width
pub const SCROLL_SPEED: f32 = 9.0;            // Exponential approach rate of the scroll location (1/s)
pub const SETTLE_EPSILON: f32 = 0.0005;       // Distance under which the location snaps onto its target
pub const DRAG_THRESHOLD: f32 = 0.25;         // Drag distance (in slides) that commits a move

pub const INTRO_DURATION: f32 = 0.6;          // Header fade/slide-in duration (seconds)
pub const INTRO_OFFSET: f32 = 20.0;           // Header slide-in distance (pixels)

pub const SLIDE_GAP: f32 = 16.0;              // Space between two slides (pixels)
pub const BUTTON_SIZE: f32 = 48.0;            // Play/pause and prev/next buttons (pixels)
pub const DOT_SIZE: f32 = 12.0;               // Inactive dot indicator (pixels)
pub const DOT_ACTIVE_WIDTH: f32 = 32.0;       // Selected dot indicator width (pixels)
pub const THUMB_WIDTH: f32 = 80.0;            // Thumbnail preview width (pixels)
pub const THUMB_HEIGHT: f32 = 56.0;           // Thumbnail preview height (pixels)
pub const THUMBS_MIN_WIDTH: i32 = 768;        // Narrower windows hide the thumbnail row
