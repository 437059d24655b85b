pub use display::{frame_to_texture, Display, BACKGROUND, FOREGROUND};

mod display;
