//! Diagnostic event kinds reported by the parser.

use core::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
///Closed set of diagnostic events the parser can report.
///
///Exactly one of these is reported per failed parse, via the callback passed
///to [`crate::parse_with_diagnostics`].
pub enum DiagKind {
    ///Input was empty or otherwise structurally unusable before parsing began.
    InvalidInput,
    ///A byte did not map to any recognised event class.
    InvalidInputChar,
    ///Input exceeded [`crate::MAX_INPUT_LEN`].
    StringSizeExceeded,
    ///More than one opening `[` was seen.
    InvalidBrackets,
    ///More than one `::` zero-run abbreviation was seen.
    InvalidAbbrev,
    ///A decimal token (CIDR mask or port) could not be read back from its position.
    InvalidDecimalToken,
    ///A hexadecimal token (address component) could not be read back from its position.
    InvalidHexToken,
    ///An IPv6 address did not have exactly 8 components.
    V6BadComponentCount,
    ///An IPv6 component exceeded `0xffff`.
    V6ComponentOutOfRange,
    ///An embedded IPv4 tail did not have exactly 4 octets.
    V4BadComponentCount,
    ///An IPv4 octet exceeded 255.
    V4ComponentOutOfRange,
    ///An embedded IPv4 tail started too early to leave room for 32 bits.
    Ipv4RequiredBits,
    ///An embedded IPv4 tail was found outside of the last 32 bits of the address.
    Ipv4IncorrectPosition,
    ///An embedded IPv4 tail was flagged but did not resolve to exactly 4 octets.
    InvalidIpv4Embedding,
    ///A CIDR mask was outside `0..=128`.
    InvalidCidrMask,
    ///A port was outside `0..=65535`.
    InvalidPort,
}

impl DiagKind {
    ///Static human-readable message for this event, mirroring the reference parser's
    ///per-event diagnostic strings.
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid input",
            Self::InvalidInputChar => "invalid input character",
            Self::StringSizeExceeded => "input string size exceeded",
            Self::InvalidBrackets => "only one set of balanced brackets is allowed",
            Self::InvalidAbbrev => "only one abbreviation of zeros is allowed",
            Self::InvalidDecimalToken => "invalid decimal token",
            Self::InvalidHexToken => "invalid hexadecimal token",
            Self::V6BadComponentCount => "invalid number of address components",
            Self::V6ComponentOutOfRange => "address component exceeds 0xffff",
            Self::V4BadComponentCount => "invalid number of IPv4 octets in embedding",
            Self::V4ComponentOutOfRange => "IPv4 octet exceeds 255",
            Self::Ipv4RequiredBits => "IPv4 embedding requires 32 bits of address space",
            Self::Ipv4IncorrectPosition => "IPv4 embedding only allowed in last 32 address bits",
            Self::InvalidIpv4Embedding => "IPv4 embedding did not resolve to 4 octets",
            Self::InvalidCidrMask => "CIDR mask must be between 0 and 128",
            Self::InvalidPort => "port must be between 0 and 65535",
        }
    }
}

impl fmt::Display for DiagKind {
    #[inline]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.message())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
///A single diagnostic event, reported at most once per parse.
pub struct DiagEvent<'a> {
    ///The event kind.
    pub kind: DiagKind,
    ///Static message corresponding to `kind`.
    pub message: &'static str,
    ///The full input buffer the parse call was given.
    pub input: &'a [u8],
    ///Byte offset within `input` at which the event was recognised.
    pub position: usize,
}

impl<'a> DiagEvent<'a> {
    #[inline]
    pub(crate) const fn new(kind: DiagKind, input: &'a [u8], position: usize) -> Self {
        Self {
            kind,
            message: kind.message(),
            input,
            position,
        }
    }
}

impl fmt::Display for DiagEvent<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_fmt(format_args!("{} at position {}", self.message, self.position))
    }
}
