pub mod buffer;
pub mod f32;
pub mod io;
pub mod traits;

pub use self::buffer::{Image, PixelType, Samples};
pub use self::f32::ImageF32;
pub use self::traits::{ImageView, Rows};
