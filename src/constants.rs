//! Protocol constants and bitmasks for the packet-to-audio pipeline.
//!
//! Defines the header geometry and field constants for the layers the
//! pipeline strips (Ethernet, IPv4, UDP, RTP) plus per-codec framing
//! constants used by the decode stage.

// --- Ethernet (IEEE 802.3) ---

/// Ethernet II header length in bytes (dst MAC + src MAC + EtherType).
pub const ETHERNET_HEADER_LENGTH_BYTES: usize = 14;
/// EtherType value identifying an IPv4 payload.
pub const ETHERTYPE_IPV4: u16 = 0x0800;

// --- IPv4 (RFC 791) ---

/// IPv4 header length in bytes without options. Options are not supported;
/// the pipeline always strips exactly this many bytes.
pub const IPV4_HEADER_LENGTH_BYTES: usize = 20;
/// IP protocol number for UDP (User Datagram Protocol).
pub const IP_PROTOCOL_UDP: u8 = 17;

// --- UDP (RFC 768) ---

/// UDP header length in bytes.
pub const UDP_HEADER_LENGTH_BYTES: usize = 8;

// --- RTP (RFC 3550) ---

/// Fixed RTP header length in bytes when the CSRC count is zero.
pub const RTP_HEADER_LENGTH_BYTES: usize = 12;
/// The only RTP version this pipeline accepts.
pub const RTP_VERSION: u8 = 2;

// --- Codec framing ---

/// G.729 compressed frame length in bytes (80 bits).
pub const G729_FRAME_LENGTH_BYTES: usize = 10;
/// Number of linear PCM samples produced per G.729 frame (10 ms at 8 kHz).
pub const G729_SAMPLES_PER_FRAME: usize = 80;
/// G.729 subframe length in samples (5 ms at 8 kHz).
pub const G729_SUBFRAME_LENGTH: usize = 40;
/// Linear prediction order used by the G.729 synthesis filter.
pub const G729_LP_ORDER: usize = 10;
/// Minimum G.729 pitch lag in samples.
pub const G729_PITCH_LAG_MIN: usize = 20;
/// Maximum G.729 pitch lag in samples.
pub const G729_PITCH_LAG_MAX: usize = 143;

// --- Waveform container ---

/// RIFF/WAVE format code for uncompressed PCM.
pub const WAVE_FORMAT_PCM: u16 = 1;
/// Length in bytes of the "fmt " chunk body for PCM.
pub const WAVE_FMT_CHUNK_LENGTH: u32 = 16;
