pub mod pixel_surface;

pub use pixel_surface::PixelSurface;
