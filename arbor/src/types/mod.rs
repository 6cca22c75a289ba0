mod color;

pub use color::{ParseColorError, Rgb};
