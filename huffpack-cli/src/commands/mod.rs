//! Command implementations for the huffpack CLI.

pub mod codes;
pub mod completions;
pub mod compress;
pub mod decompress;
pub mod info;

pub use codes::cmd_codes;
pub use completions::cmd_completions;
pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use info::cmd_info;

use huffpack_codec::{CodecConfig, ContainerFormat};

/// Flags shared by `compress` and `decompress`.
pub struct TransformOptions {
    pub raw: bool,
    pub verify: bool,
    pub force: bool,
    pub progress: bool,
}

impl TransformOptions {
    /// Codec configuration selected by the flags.
    pub fn codec_config(&self) -> CodecConfig {
        let format = if self.raw {
            ContainerFormat::Raw
        } else {
            ContainerFormat::Framed
        };
        CodecConfig::new(format).with_verify(self.verify)
    }
}
