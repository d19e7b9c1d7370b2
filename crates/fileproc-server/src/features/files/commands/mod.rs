pub mod upload;

pub use upload::{UploadFileCommand, UPLOAD_FIELD};
