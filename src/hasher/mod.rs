//! Pluggable SHA-256 backends.
//!
//! Every backend computes the same digest; they differ in implementation
//! strategy and throughput. The backend is chosen at configuration time so
//! the search and the benchmark can swap implementations without touching
//! call sites.

mod library;
mod oneshot;
mod scratch;

pub use library::LibraryHasher;
pub use oneshot::OneshotHasher;
pub use scratch::ScratchHasher;

/// 32-byte SHA-256 digest.
pub type Digest = [u8; 32];

/// A named SHA-256 implementation.
///
/// `hash` takes `&mut self` so backends may keep reusable internal state
/// between digests; one instance is owned by exactly one worker.
pub trait Hasher: Send {
    /// Human-readable name for this backend
    fn name(&self) -> &'static str;

    /// Digest a complete message
    fn hash(&mut self, input: &[u8]) -> Digest;
}

/// Available hasher backends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HasherType {
    /// From-scratch streaming implementation
    Scratch,
    /// From-scratch slice-at-a-time implementation
    Oneshot,
    /// RustCrypto `sha2` implementation
    Library,
}

impl HasherType {
    /// Create a boxed backend instance
    pub fn create(&self) -> Box<dyn Hasher> {
        match self {
            HasherType::Scratch => Box::new(ScratchHasher),
            HasherType::Oneshot => Box::new(OneshotHasher),
            HasherType::Library => Box::new(LibraryHasher::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HasherType::Scratch => "scratch",
            HasherType::Oneshot => "oneshot",
            HasherType::Library => "sha2",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "scratch" => Ok(HasherType::Scratch),
            "oneshot" => Ok(HasherType::Oneshot),
            "sha2" | "library" => Ok(HasherType::Library),
            _ => Err(format!(
                "Unknown hasher: {}. Valid: scratch, oneshot, sha2",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(HasherType::from_str("scratch"), Ok(HasherType::Scratch));
        assert_eq!(HasherType::from_str("oneshot"), Ok(HasherType::Oneshot));
        assert_eq!(HasherType::from_str("sha2"), Ok(HasherType::Library));
        assert_eq!(HasherType::from_str("library"), Ok(HasherType::Library));
        assert_eq!(HasherType::from_str("SHA2"), Ok(HasherType::Library));
        assert!(HasherType::from_str("md5").is_err());
    }

    #[test]
    fn test_backends_agree() {
        let messages: [&[u8]; 5] = [
            b"",
            b"abc",
            b"aab",
            b"The quick brown fox jumps over the lazy dog",
            &[0x55u8; 200],
        ];

        for message in messages {
            let mut scratch = HasherType::Scratch.create();
            let mut oneshot = HasherType::Oneshot.create();
            let mut library = HasherType::Library.create();

            let expected = library.hash(message);
            assert_eq!(scratch.hash(message), expected);
            assert_eq!(oneshot.hash(message), expected);
        }
    }

    #[test]
    fn test_backend_reuse_between_digests() {
        // A single instance must produce independent digests per message.
        for kind in [HasherType::Scratch, HasherType::Oneshot, HasherType::Library] {
            let mut hasher = kind.create();
            let first = hasher.hash(b"abc");
            hasher.hash(b"interleaved message");
            assert_eq!(hasher.hash(b"abc"), first, "{}", kind.name());
        }
    }
}
