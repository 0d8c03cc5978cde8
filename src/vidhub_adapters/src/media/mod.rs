pub mod cloudinary_media_uploader;

pub use cloudinary_media_uploader::CloudinaryMediaUploader;
