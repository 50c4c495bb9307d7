mod assets;

pub use assets::{AssetError, AssetErrorExt, AssetPolicy, ImageSource, is_vector_image};
