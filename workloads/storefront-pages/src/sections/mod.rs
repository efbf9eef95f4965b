//! HTML section renderers for the storefront pages.

mod cards;
mod cart;
mod hero;
mod html;
mod reviews;

pub use cards::*;
pub use cart::*;
pub use hero::*;
pub use html::*;
pub use reviews::*;
