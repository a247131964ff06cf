mod intensity;
mod utils;

use smart_leds::RGB8;

pub use intensity::Intensity;
pub use utils::blend_colors;

pub type Rgb = RGB8;
