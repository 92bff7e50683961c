use std::time::Duration;

pub const RENDER_WIDTH: i32 = 1280;           // Default window width
pub const RENDER_HEIGHT: i32 = 720;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const DWELL_DURATION: Duration = Duration::from_millis(5000);    // Time each item stays on screen during autoplay
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);      // Progress sampling interval
pub const COOLDOWN_DURATION: Duration = Duration::from_millis(3000); // Autoplay suspension after manual navigation

pub const SWIPE_THRESHOLD: f32 = 50.0;        // Minimum horizontal travel for a swipe

pub const WIDE_VIEWPORT: f32 = 768.0;         // Tablet breakpoint, story arrows appear from here
pub const DESKTOP_VIEWPORT: f32 = 1200.0;     // Desktop breakpoint for responsive slide images

pub const SLIDE_TRANSITION: Duration = Duration::from_millis(400); // Carousel slide-in
pub const FADE_TRANSITION: Duration = Duration::from_millis(250);  // Story fade/scale-in
