//! Shared test plumbing: a scriptable in-memory transport and wire-frame
//! builders.
#![allow(dead_code)]

use std::io;

use navrx::parser::ubx_checksum;
use navrx::transport::ByteTransport;

/// Scriptable transport. Each `read` pops one chunk from the queue (an
/// empty queue reports `WouldBlock`); writes are recorded, and can be
/// made to fail starting from the Nth write.
pub struct MockTransport {
    pub reads: Vec<Vec<u8>>,
    pub writes: Vec<Vec<u8>>,
    pub fail_write_from: Option<usize>,
    pub flushes: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            reads: Vec::new(),
            writes: Vec::new(),
            fail_write_from: None,
            flushes: 0,
        }
    }

    pub fn with_reads(reads: Vec<Vec<u8>>) -> Self {
        Self {
            reads,
            ..Self::new()
        }
    }
}

impl ByteTransport for MockTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.reads.is_empty() {
            return Err(io::Error::from(io::ErrorKind::WouldBlock));
        }
        let chunk = self.reads.remove(0);
        let count = chunk.len().min(buf.len());
        buf[..count].copy_from_slice(&chunk[..count]);
        Ok(count)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        if let Some(threshold) = self.fail_write_from {
            if self.writes.len() + 1 >= threshold {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
        }
        self.writes.push(buf.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Assembles a complete UBX frame around the given payload.
pub fn ubx_frame(class: u8, msg_id: u8, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0xb5, 0x62, class, msg_id];
    frame.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    frame.extend_from_slice(payload);
    let (ck_a, ck_b) = ubx_checksum(&frame[2..]);
    frame.push(ck_a);
    frame.push(ck_b);
    frame
}

/// NAV-POSLLH with the given scaled coordinates.
pub fn nav_pos_llh_frame(itow: u32, lat_deg: f64, lon_deg: f64, height_m: f64) -> Vec<u8> {
    let mut payload = [0u8; 28];
    payload[0..4].copy_from_slice(&itow.to_le_bytes());
    payload[4..8].copy_from_slice(&((lon_deg * 1e7) as i32).to_le_bytes());
    payload[8..12].copy_from_slice(&((lat_deg * 1e7) as i32).to_le_bytes());
    payload[12..16].copy_from_slice(&((height_m * 1e3) as i32).to_le_bytes());
    ubx_frame(0x01, 0x02, &payload)
}

/// NAV-VELNED with the given NED velocity.
pub fn nav_vel_ned_frame(itow: u32, north_m_s: f64, east_m_s: f64) -> Vec<u8> {
    let mut payload = [0u8; 36];
    payload[0..4].copy_from_slice(&itow.to_le_bytes());
    payload[4..8].copy_from_slice(&((north_m_s * 1e2) as i32).to_le_bytes());
    payload[8..12].copy_from_slice(&((east_m_s * 1e2) as i32).to_le_bytes());
    ubx_frame(0x01, 0x12, &payload)
}

/// MON-VER carrying the given version strings.
pub fn mon_ver_frame(software: &str, hardware: &str) -> Vec<u8> {
    let mut payload = [0u8; 40];
    payload[..software.len()].copy_from_slice(software.as_bytes());
    payload[30..30 + hardware.len()].copy_from_slice(hardware.as_bytes());
    ubx_frame(0x0a, 0x04, &payload)
}

/// GIG navigation solution frame with the given scaled fields.
pub fn gig_nav_frame(tow_ms: u32, lat_deg: f64, lon_deg: f64) -> Vec<u8> {
    let mut payload = [0u8; 44];
    payload[0..4].copy_from_slice(&tow_ms.to_le_bytes());
    payload[4..8].copy_from_slice(&((lat_deg * 1e7) as i32).to_le_bytes());
    payload[8..12].copy_from_slice(&((lon_deg * 1e7) as i32).to_le_bytes());
    payload[28..32].copy_from_slice(&0x01u32.to_le_bytes()); // nav valid
    let mut frame = vec![0x47, 0x49, 0x47, 0x01];
    frame.extend_from_slice(&100i16.to_le_bytes());
    frame.extend_from_slice(&52i16.to_le_bytes());
    frame.extend_from_slice(&payload);
    frame
}
