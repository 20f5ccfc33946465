//! Configuration module

mod cms;

pub use cms::CmsConfig;
pub use cms::SpeechConfig;
pub use cms::words_per_minute;
pub use cms::CONFIG_FILES;
