//! Codec configuration and container constants.

/// Number of distinct symbols: every byte value 0-255.
pub const ALPHABET_SIZE: usize = 256;

/// Longest code the encoder can emit, bounded by its 64-bit code register.
pub const MAX_CODE_LENGTH: usize = 64;

/// Magic bytes opening a framed container ("HUFP").
pub const MAGIC: [u8; 4] = *b"HUFP";

/// Current framed container version.
pub const FORMAT_VERSION: u8 = 1;

/// Container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerFormat {
    /// Magic and version byte in front of the legacy sections.
    #[default]
    Framed,
    /// Legacy headerless layout: tree, bit count, packed bits.
    Raw,
}

impl ContainerFormat {
    /// Size of the fixed prefix preceding the tree section.
    pub fn header_len(self) -> usize {
        match self {
            Self::Framed => MAGIC.len() + 1,
            Self::Raw => 0,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Framed => "framed",
            Self::Raw => "raw",
        }
    }
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Encoder/decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Container layout to write or expect.
    pub format: ContainerFormat,
    /// Decode the freshly encoded container and compare before returning it.
    pub verify: bool,
}

impl CodecConfig {
    /// Framed containers (magic + version), no self-check.
    pub const FRAMED: Self = Self {
        format: ContainerFormat::Framed,
        verify: false,
    };

    /// Legacy headerless containers.
    pub const RAW: Self = Self {
        format: ContainerFormat::Raw,
        verify: false,
    };

    /// Create a configuration for the given layout.
    pub fn new(format: ContainerFormat) -> Self {
        Self {
            format,
            verify: false,
        }
    }

    /// Enable or disable the post-encode self-check.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::FRAMED
    }
}
