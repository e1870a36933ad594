//! Self-contained wire-format runtime: primitive codec helpers, the decode
//! context, and the error types shared by every type's encoder/decoder.
//!
//! This file is real, compiled Rust: it is exercised directly by this
//! crate's own tests (see `tests/wire.rs`) so the wire format is verified
//! by execution, not just by `syn`-parsing a string template. The exact
//! same source is also stamped verbatim into every generated package as
//! `runtime.rs` (see `runtime_template::RUST_RUNTIME_TEMPLATE`), so the
//! tested code and the shipped code can never diverge.

/// Maximum total encoded size accepted by a single decode call, in bytes.
pub const MAX_SERIALIZED_SIZE: u64 = 134_217_728;
/// Maximum element count for any single array.
pub const MAX_ARRAY_ELEMENTS: u32 = 1_000_000;
/// Maximum cumulative element count across all arrays nested within one decode.
pub const MAX_TOTAL_ELEMENTS: u32 = 10_000_000;
/// Maximum struct/optional/array nesting depth during decode.
pub const MAX_NESTING_DEPTH: u32 = 20;
/// The three magic bytes that open every message header.
pub const MESSAGE_MAGIC: [u8; 3] = [0x53, 0x44, 0x50];
/// The message-format version byte, ASCII `'2'`.
pub const MESSAGE_VERSION: u8 = 0x32;
/// Total header size in bytes: magic + version + type id + payload length.
pub const MESSAGE_HEADER_SIZE: usize = 10;

/// A decode-time failure. Every decoder returns this instead of panicking.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Fewer bytes remained than the value being decoded requires.
    UnexpectedEof {
        /// Bytes the read needed.
        expected: usize,
        /// Bytes actually remaining.
        available: usize,
    },
    /// A `str` payload was not valid UTF-8.
    InvalidUtf8 {
        /// Byte offset the string payload started at.
        offset: usize,
    },
    /// A `bool` byte was neither 0 nor 1.
    InvalidBool {
        /// The offending byte.
        byte: u8,
        /// Offset the byte was read from.
        offset: usize,
    },
    /// An optional's presence byte was neither 0 nor 1.
    InvalidPresence {
        /// The offending byte.
        byte: u8,
        /// Offset the byte was read from.
        offset: usize,
    },
    /// An array's declared element count exceeded `MAX_ARRAY_ELEMENTS`.
    ArrayTooLarge {
        /// The declared count.
        count: u32,
        /// The limit it exceeded.
        max: u32,
    },
    /// The cumulative element count across all arrays in this decode
    /// exceeded `MAX_TOTAL_ELEMENTS`.
    TooManyElements {
        /// The cumulative count that tripped the limit.
        cumulative: u32,
        /// The limit it exceeded.
        max: u32,
    },
    /// The input exceeded `MAX_SERIALIZED_SIZE`.
    DataTooLarge {
        /// The input length.
        len: usize,
        /// The limit it exceeded.
        max: u64,
    },
    /// Nesting depth exceeded `MAX_NESTING_DEPTH`.
    NestingTooDeep {
        /// The depth reached.
        depth: u32,
        /// The limit it exceeded.
        max: u32,
    },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEof { expected, available } => {
                write!(f, "unexpected end of input: needed {expected} bytes, {available} available")
            }
            Self::InvalidUtf8 { offset } => write!(f, "invalid utf-8 at offset {offset}"),
            Self::InvalidBool { byte, offset } => {
                write!(f, "invalid bool byte {byte:#04x} at offset {offset}")
            }
            Self::InvalidPresence { byte, offset } => {
                write!(f, "invalid presence byte {byte:#04x} at offset {offset}")
            }
            Self::ArrayTooLarge { count, max } => {
                write!(f, "array element count {count} exceeds limit {max}")
            }
            Self::TooManyElements { cumulative, max } => {
                write!(f, "cumulative element count {cumulative} exceeds limit {max}")
            }
            Self::DataTooLarge { len, max } => {
                write!(f, "input length {len} exceeds limit {max}")
            }
            Self::NestingTooDeep { depth, max } => {
                write!(f, "nesting depth {depth} exceeds limit {max}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// A message-mode failure: either a header validation problem or a wrapped
/// payload [`DecodeError`].
#[derive(Debug, Clone, PartialEq)]
pub enum MessageError {
    /// Fewer than `MESSAGE_HEADER_SIZE` bytes were supplied.
    MessageTooShort,
    /// The header's magic bytes did not match `MESSAGE_MAGIC`.
    InvalidMagic,
    /// The header's version byte did not match `MESSAGE_VERSION`.
    InvalidVersion {
        /// The offending byte.
        byte: u8,
    },
    /// The header's type id did not match any known message type.
    UnknownMessageType {
        /// The unrecognized type id.
        id: u16,
    },
    /// The header's declared payload length did not match the remaining input.
    PayloadSizeMismatch {
        /// Declared payload length.
        declared: u32,
        /// Bytes actually remaining after the header.
        actual: usize,
    },
    /// The payload failed to decode.
    DecodeError(DecodeError),
}

impl std::fmt::Display for MessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MessageTooShort => write!(f, "message shorter than the {MESSAGE_HEADER_SIZE}-byte header"),
            Self::InvalidMagic => write!(f, "invalid message magic"),
            Self::InvalidVersion { byte } => write!(f, "invalid message version byte {byte:#04x}"),
            Self::UnknownMessageType { id } => write!(f, "unknown message type id {id}"),
            Self::PayloadSizeMismatch { declared, actual } => {
                write!(f, "declared payload size {declared} does not match {actual} remaining bytes")
            }
            Self::DecodeError(inner) => write!(f, "payload decode failed: {inner}"),
        }
    }
}

impl std::error::Error for MessageError {}

impl From<DecodeError> for MessageError {
    fn from(err: DecodeError) -> Self {
        Self::DecodeError(err)
    }
}

/// Per-call decode state: running offset, cumulative array element count,
/// and nesting depth, all checked against the limits above on every read.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeContext {
    /// Current read offset into the input slice.
    pub offset: usize,
    /// Cumulative element count across every array decoded so far.
    pub cumulative_elements: u32,
    /// Current struct/optional/array nesting depth.
    pub depth: u32,
}

impl DecodeContext {
    /// A fresh decode context: offset 0, no elements consumed, depth 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter one more level of nesting, failing if this would exceed
    /// `MAX_NESTING_DEPTH`.
    pub fn enter_nesting(&mut self) -> Result<(), DecodeError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(DecodeError::NestingTooDeep {
                depth: self.depth + 1,
                max: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one level of nesting entered via [`Self::enter_nesting`].
    pub fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Record `count` additional array elements, failing if the
    /// cumulative total would exceed `MAX_TOTAL_ELEMENTS`.
    pub fn add_elements(&mut self, count: u32) -> Result<(), DecodeError> {
        let total = self.cumulative_elements.saturating_add(count);
        if total > MAX_TOTAL_ELEMENTS {
            return Err(DecodeError::TooManyElements {
                cumulative: total,
                max: MAX_TOTAL_ELEMENTS,
            });
        }
        self.cumulative_elements = total;
        Ok(())
    }
}

/// Check that the full input fits under `MAX_SERIALIZED_SIZE` before any
/// decoding begins.
pub fn check_input_size(bytes: &[u8]) -> Result<(), DecodeError> {
    let len = bytes.len();
    if len as u64 > MAX_SERIALIZED_SIZE {
        return Err(DecodeError::DataTooLarge { len, max: MAX_SERIALIZED_SIZE });
    }
    Ok(())
}

fn require(bytes: &[u8], offset: usize, len: usize) -> Result<(), DecodeError> {
    let fits = offset.checked_add(len).is_some_and(|end| end <= bytes.len());
    if fits {
        Ok(())
    } else {
        Err(DecodeError::UnexpectedEof {
            expected: len,
            available: bytes.len().saturating_sub(offset),
        })
    }
}

/// Append a single byte.
pub fn write_u8(buf: &mut Vec<u8>, value: u8) {
    buf.push(value);
}

/// Read a single byte, advancing `ctx`.
pub fn read_u8(bytes: &[u8], ctx: &mut DecodeContext) -> Result<u8, DecodeError> {
    require(bytes, ctx.offset, 1)?;
    let value = bytes[ctx.offset];
    ctx.offset += 1;
    Ok(value)
}

/// Append a single signed byte.
pub fn write_i8(buf: &mut Vec<u8>, value: i8) {
    buf.push(value.to_le_bytes()[0]);
}

/// Read a single signed byte, advancing `ctx`.
pub fn read_i8(bytes: &[u8], ctx: &mut DecodeContext) -> Result<i8, DecodeError> {
    Ok(read_u8(bytes, ctx)? as i8)
}

/// Append a bool as a single `0`/`1` byte.
pub fn write_bool(buf: &mut Vec<u8>, value: bool) {
    buf.push(u8::from(value));
}

/// Read a bool byte, advancing `ctx`. Any byte other than `0`/`1` fails.
pub fn read_bool(bytes: &[u8], ctx: &mut DecodeContext) -> Result<bool, DecodeError> {
    let offset = ctx.offset;
    match read_u8(bytes, ctx)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(DecodeError::InvalidBool { byte: other, offset }),
    }
}

macro_rules! fixed_width_codec {
    ($write:ident, $read:ident, $ty:ty, $width:expr) => {
        #[doc = concat!("Append a little-endian `", stringify!($ty), "`.")]
        pub fn $write(buf: &mut Vec<u8>, value: $ty) {
            buf.extend_from_slice(&value.to_le_bytes());
        }

        #[doc = concat!("Read a little-endian `", stringify!($ty), "`, advancing `ctx`.")]
        pub fn $read(bytes: &[u8], ctx: &mut DecodeContext) -> Result<$ty, DecodeError> {
            require(bytes, ctx.offset, $width)?;
            let mut raw = [0u8; $width];
            raw.copy_from_slice(&bytes[ctx.offset..ctx.offset + $width]);
            ctx.offset += $width;
            Ok(<$ty>::from_le_bytes(raw))
        }
    };
}

fixed_width_codec!(write_u16, read_u16, u16, 2);
fixed_width_codec!(write_u32, read_u32, u32, 4);
fixed_width_codec!(write_u64, read_u64, u64, 8);
fixed_width_codec!(write_i16, read_i16, i16, 2);
fixed_width_codec!(write_i32, read_i32, i32, 4);
fixed_width_codec!(write_i64, read_i64, i64, 8);
fixed_width_codec!(write_f32, read_f32, f32, 4);
fixed_width_codec!(write_f64, read_f64, f64, 8);

/// Append a `u32` length prefix followed by the raw bytes.
pub fn write_len_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) {
    // Size pre-calculation bounds the output under MAX_SERIALIZED_SIZE
    // before any encoder runs, so this length always fits a u32.
    write_u32(buf, bytes.len() as u32);
    buf.extend_from_slice(bytes);
}

/// Read a `u32` length prefix followed by that many raw bytes, advancing `ctx`.
pub fn read_len_prefixed<'a>(bytes: &'a [u8], ctx: &mut DecodeContext) -> Result<&'a [u8], DecodeError> {
    let len = read_u32(bytes, ctx)? as usize;
    require(bytes, ctx.offset, len)?;
    let start = ctx.offset;
    ctx.offset += len;
    Ok(&bytes[start..start + len])
}

/// Append a length-prefixed UTF-8 string.
pub fn write_str(buf: &mut Vec<u8>, value: &str) {
    write_len_prefixed(buf, value.as_bytes());
}

/// Read a length-prefixed string, advancing `ctx`. Fails if the payload
/// is not valid UTF-8.
pub fn read_str(bytes: &[u8], ctx: &mut DecodeContext) -> Result<String, DecodeError> {
    let offset = ctx.offset;
    let raw = read_len_prefixed(bytes, ctx)?;
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|_| DecodeError::InvalidUtf8 { offset })
}

/// Append a length-prefixed byte string.
pub fn write_bytes(buf: &mut Vec<u8>, value: &[u8]) {
    write_len_prefixed(buf, value);
}

/// Read a length-prefixed byte string, advancing `ctx`.
pub fn read_bytes(bytes: &[u8], ctx: &mut DecodeContext) -> Result<Vec<u8>, DecodeError> {
    read_len_prefixed(bytes, ctx).map(<[u8]>::to_vec)
}

/// Read and validate an array length prefix, recording its elements
/// against the decode context's cumulative-element counter.
pub fn read_array_len(bytes: &[u8], ctx: &mut DecodeContext) -> Result<u32, DecodeError> {
    let count = read_u32(bytes, ctx)?;
    if count > MAX_ARRAY_ELEMENTS {
        return Err(DecodeError::ArrayTooLarge { count, max: MAX_ARRAY_ELEMENTS });
    }
    ctx.add_elements(count)?;
    Ok(count)
}

/// Append an array length prefix.
pub fn write_array_len(buf: &mut Vec<u8>, count: u32) {
    write_u32(buf, count);
}

/// Append an optional's presence byte.
pub fn write_presence(buf: &mut Vec<u8>, present: bool) {
    buf.push(u8::from(present));
}

/// Read an optional's presence byte, advancing `ctx`. Any byte other than
/// `0`/`1` fails.
pub fn read_presence(bytes: &[u8], ctx: &mut DecodeContext) -> Result<bool, DecodeError> {
    let offset = ctx.offset;
    match read_u8(bytes, ctx)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(DecodeError::InvalidPresence { byte: other, offset }),
    }
}

/// Write a message header: magic, version, type id, payload length.
pub fn write_message_header(buf: &mut Vec<u8>, type_id: u16, payload_len: u32) {
    buf.extend_from_slice(&MESSAGE_MAGIC);
    buf.push(MESSAGE_VERSION);
    buf.extend_from_slice(&type_id.to_le_bytes());
    buf.extend_from_slice(&payload_len.to_le_bytes());
}

/// Parsed fields of a validated message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// The header's type id field.
    pub type_id: u16,
    /// The header's declared payload length field.
    pub payload_len: u32,
}

/// Validate and parse a message header shared by every message type's
/// decoder and the schema-scope dispatched decoder.
pub fn read_message_header(bytes: &[u8]) -> Result<MessageHeader, MessageError> {
    if bytes.len() < MESSAGE_HEADER_SIZE {
        return Err(MessageError::MessageTooShort);
    }
    if bytes[0..3] != MESSAGE_MAGIC {
        return Err(MessageError::InvalidMagic);
    }
    if bytes[3] != MESSAGE_VERSION {
        return Err(MessageError::InvalidVersion { byte: bytes[3] });
    }
    let mut type_id_raw = [0u8; 2];
    type_id_raw.copy_from_slice(&bytes[4..6]);
    let type_id = u16::from_le_bytes(type_id_raw);
    let mut payload_len_raw = [0u8; 4];
    payload_len_raw.copy_from_slice(&bytes[6..10]);
    let payload_len = u32::from_le_bytes(payload_len_raw);
    let actual = bytes.len() - MESSAGE_HEADER_SIZE;
    if payload_len as usize != actual {
        return Err(MessageError::PayloadSizeMismatch { declared: payload_len, actual });
    }
    Ok(MessageHeader { type_id, payload_len })
}
