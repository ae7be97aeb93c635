//! Common test utilities for call-audio pipeline integration tests.
//!
//! Provides shared helpers for building captured Ethernet/IPv4/UDP/RTP
//! frames and for picking apart RIFF/WAVE images in assertions.

#![allow(dead_code)] // Allow dead code for unused test helpers during development

use rtpwav::RawFrame;

/// Source/destination endpoints used by every generated frame.
pub const TEST_SRC_IP: [u8; 4] = [10, 0, 2, 15];
pub const TEST_DST_IP: [u8; 4] = [10, 0, 2, 20];
pub const TEST_SRC_PORT: u16 = 27942;
pub const TEST_DST_PORT: u16 = 6000;
pub const TEST_SSRC: u32 = 0x343d_a99b;

/// Builds a complete captured frame: Ethernet II + IPv4 + UDP + RTP fixed
/// header around the given media payload.
pub fn build_rtp_frame(
    payload_type: u8,
    sequence_number: u16,
    timestamp: u32,
    payload: &[u8],
) -> Vec<u8> {
    let mut frame = Vec::with_capacity(54 + payload.len());

    // Ethernet II
    frame.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
    frame.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x02]);
    frame.extend_from_slice(&[0x08, 0x00]);

    // IPv4, fixed 20-byte header, DF set, TTL 64
    let ip_total = (20 + 8 + 12 + payload.len()) as u16;
    frame.extend_from_slice(&[0x45, 0x00]);
    frame.extend_from_slice(&ip_total.to_be_bytes());
    frame.extend_from_slice(&[0x00, 0x01, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00]);
    frame.extend_from_slice(&TEST_SRC_IP);
    frame.extend_from_slice(&TEST_DST_IP);

    // UDP
    frame.extend_from_slice(&TEST_SRC_PORT.to_be_bytes());
    frame.extend_from_slice(&TEST_DST_PORT.to_be_bytes());
    frame.extend_from_slice(&((8 + 12 + payload.len()) as u16).to_be_bytes());
    frame.extend_from_slice(&[0x00, 0x00]);

    // RTP fixed header, version 2, no CSRC
    frame.push(0x80);
    frame.push(payload_type & 0x7F);
    frame.extend_from_slice(&sequence_number.to_be_bytes());
    frame.extend_from_slice(&timestamp.to_be_bytes());
    frame.extend_from_slice(&TEST_SSRC.to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// A PCMU frame carrying 160 bytes of u-law digital silence (0xFF), the
/// shape of a standard 20 ms narrowband packet.
pub fn pcmu_silence_frame(sequence_number: u16) -> Vec<u8> {
    build_rtp_frame(0, sequence_number, u32::from(sequence_number) * 160, &[0xff; 160])
}

/// Rewrites a frame's EtherType so it no longer claims IPv4.
pub fn make_non_ip(frame: &mut [u8]) {
    frame[12] = 0x08;
    frame[13] = 0x06; // ARP
}

/// Rewrites a frame's IP protocol so it no longer claims UDP.
pub fn make_non_udp(frame: &mut [u8]) {
    frame[23] = 6; // TCP
}

/// Wraps raw frame buffers as capture-indexed [`RawFrame`]s.
pub fn as_raw_frames(raw: &[Vec<u8>]) -> Vec<RawFrame<'_>> {
    raw.iter()
        .enumerate()
        .map(|(i, bytes)| RawFrame::new(bytes, i))
        .collect()
}

/// Little-endian u16 at a byte offset of a WAV image.
pub fn wav_u16(wav: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([wav[offset], wav[offset + 1]])
}

/// Little-endian u32 at a byte offset of a WAV image.
pub fn wav_u32(wav: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        wav[offset],
        wav[offset + 1],
        wav[offset + 2],
        wav[offset + 3],
    ])
}

/// The PCM payload of a WAV image produced by this pipeline.
pub fn wav_data(wav: &[u8]) -> &[u8] {
    assert_eq!(&wav[36..40], b"data");
    &wav[44..]
}
