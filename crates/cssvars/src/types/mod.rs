pub mod color;
pub mod function;
pub mod value;

pub use color::{Hsl, RgbaColor};
pub use function::ColorFn;
pub use value::ColorValue;
