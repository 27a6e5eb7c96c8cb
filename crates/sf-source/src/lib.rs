//! Image I/O for curvetone: grayscale input, bilevel output.

pub mod image;
