#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../README.md"))]

#[doc(inline)]
pub use rasterwarp_image as image;

#[doc(inline)]
pub use rasterwarp_imgproc as imgproc;

#[doc(inline)]
pub use rasterwarp_io as io;
