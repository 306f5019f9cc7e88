use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Scale must be a positive finite number, got {0}")]
    InvalidScale(f32),

    #[error("Canvas would be empty at scale {0}")]
    EmptyCanvas(f32),

    #[error("Failed to allocate a {0}x{1} canvas")]
    Allocation(u32, u32),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
