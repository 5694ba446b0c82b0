use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use log::info;
use serialport::{ClearBuffer, SerialPort};

use super::error::BenchError;
use crate::config::BenchConfig;
use crate::types::{BenchReading, RawFrame};

/// Handshake token exchanged in both directions.
const HANDSHAKE_BYTE: u8 = b'a';
/// Request byte asking the controller for one data frame.
const POLL_BYTE: u8 = b'n';
/// Shortest complete frame: five single-digit fields, four commas, CRLF.
const MIN_FRAME_LEN: usize = 11;

/// An open session with the bench controller.
///
/// The session owns the serial handle for its whole lifetime: it is created
/// by [`BenchSession::connect`] once the handshake succeeds and the port is
/// closed when the session is dropped or consumed by
/// [`BenchSession::disconnect`].
pub struct BenchSession {
    port: Box<dyn SerialPort>,
    reading: BenchReading,
    encoder_zero: i32,
    last_frame: String,
    counts_per_rev: u32,
}

impl BenchSession {
    /// Open `port_name` and perform the controller handshake.
    ///
    /// The controller announces itself by repeating a single `'a'` line;
    /// once seen we acknowledge with the same byte, wait for the controller
    /// to settle and flush whatever it sent in the meantime.
    pub fn connect(port_name: &str, config: &BenchConfig) -> Result<Self, BenchError> {
        let mut port = serialport::new(port_name, config.baud_rate)
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .open()?;

        wait_for_handshake(
            port.as_mut(),
            Duration::from_millis(config.handshake_timeout_ms),
        )?;
        port.write_all(&[HANDSHAKE_BYTE])?;
        thread::sleep(Duration::from_millis(config.settle_ms));
        port.clear(ClearBuffer::Input)?;

        info!("successfully connected to bench controller on {}", port_name);
        Ok(Self {
            port,
            reading: BenchReading::default(),
            encoder_zero: 0,
            last_frame: String::new(),
            counts_per_rev: config.encoder_counts_per_rev,
        })
    }

    /// Request one data frame and update the cached reading.
    ///
    /// Blocks until the controller answers with a complete frame; the read
    /// re-arms on every port timeout, so a silent controller stalls the
    /// caller rather than failing the link.
    pub fn poll(&mut self) -> Result<BenchReading, BenchError> {
        self.port.clear(ClearBuffer::Input)?;
        self.port.write_all(&[POLL_BYTE])?;

        let line = read_frame_line(self.port.as_mut())?;
        let frame = parse_frame(&line)?;
        self.last_frame = line;
        self.reading = BenchReading::from_frame(
            &frame,
            self.encoder_zero,
            self.counts_per_rev,
            Utc::now().timestamp_millis(),
        );

        Ok(self.reading)
    }

    /// Poll once and adopt the fresh raw encoder position as the zero offset.
    pub fn zero_encoder(&mut self) -> Result<(), BenchError> {
        let reading = self.poll()?;
        self.encoder_zero = reading.encoder_counts;
        self.reading.angle = 0.0;
        info!("encoder zeroed at {} counts", self.encoder_zero);
        Ok(())
    }

    /// Close the link. Dropping the session closes the port either way.
    pub fn disconnect(self) {
        info!("bench connection closed");
    }

    pub fn reading(&self) -> &BenchReading {
        &self.reading
    }

    /// Raw text of the last received frame, for diagnostics.
    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }
}

/// Wait for the controller's `'a'` handshake line, up to `timeout`.
fn wait_for_handshake<R: Read + ?Sized>(port: &mut R, timeout: Duration) -> Result<(), BenchError> {
    let start = Instant::now();
    let mut line: Vec<u8> = Vec::new();
    let mut buf = [0u8; 16];

    loop {
        if start.elapsed() > timeout {
            return Err(BenchError::HandshakeTimeout(timeout));
        }

        let received = match port.read(&mut buf) {
            Ok(received) => received,
            Err(err) if is_read_wait(&err) => continue,
            Err(err) => return Err(BenchError::Io(err)),
        };

        for &byte in &buf[..received] {
            if byte == b'\n' {
                if line == [HANDSHAKE_BYTE, b'\r'] {
                    return Ok(());
                }
                line.clear();
            } else {
                line.push(byte);
            }
        }
    }
}

/// Read until a complete CRLF-terminated frame of plausible length arrives.
///
/// Complete lines shorter than a minimal frame are controller chatter and
/// are discarded. There is deliberately no deadline here: polling blocks
/// until the controller replies.
fn read_frame_line<R: Read + ?Sized>(port: &mut R) -> Result<String, BenchError> {
    let mut line: Vec<u8> = Vec::new();
    let mut buf = [0u8; 64];

    loop {
        let received = match port.read(&mut buf) {
            Ok(received) => received,
            Err(err) if is_read_wait(&err) => continue,
            Err(err) => return Err(BenchError::Io(err)),
        };

        for &byte in &buf[..received] {
            line.push(byte);
            if byte == b'\n' {
                if line.len() >= MIN_FRAME_LEN {
                    return Ok(String::from_utf8_lossy(&line).into_owned());
                }
                line.clear();
            }
        }
    }
}

/// Parse a frame line into its five integer fields.
fn parse_frame(line: &str) -> Result<RawFrame, BenchError> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = trimmed.split(',').collect();

    if fields.len() != 5 {
        return Err(BenchError::MalformedFrame {
            line: trimmed.to_string(),
            reason: format!("expected 5 fields, found {}", fields.len()),
        });
    }

    let mut values = [0i32; 5];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field
            .trim()
            .parse()
            .map_err(|_| BenchError::MalformedFrame {
                line: trimmed.to_string(),
                reason: format!("invalid integer {:?}", field),
            })?;
    }

    Ok(RawFrame {
        force_left: values[0],
        force_right: values[1],
        encoder_counts: values[2],
        pressure_left: values[3],
        pressure_right: values[4],
    })
}

fn is_read_wait(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// Reader that hands out its data in fixed chunks, the way a serial
    /// port surfaces bytes as they trickle in.
    struct ChunkReader {
        chunks: VecDeque<Vec<u8>>,
    }

    impl ChunkReader {
        fn new(chunks: &[&[u8]]) -> Self {
            Self {
                chunks: chunks.iter().map(|chunk| chunk.to_vec()).collect(),
            }
        }
    }

    impl Read for ChunkReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunks.pop_front() {
                Some(chunk) => {
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                None => Err(io::Error::from(io::ErrorKind::TimedOut)),
            }
        }
    }

    #[test]
    fn parses_five_integer_frame() {
        let frame = parse_frame("120,340,2731,55,61\r\n").unwrap();
        assert_eq!(
            frame,
            RawFrame {
                force_left: 120,
                force_right: 340,
                encoder_counts: 2731,
                pressure_left: 55,
                pressure_right: 61,
            }
        );
    }

    #[test]
    fn rejects_frame_with_too_few_fields() {
        let err = parse_frame("120,340,2731,55\r\n").unwrap_err();
        assert!(matches!(err, BenchError::MalformedFrame { .. }));
    }

    #[test]
    fn rejects_frame_with_extra_fields() {
        let err = parse_frame("120,340,2731,55,61,99\r\n").unwrap_err();
        assert!(matches!(err, BenchError::MalformedFrame { .. }));
    }

    #[test]
    fn rejects_non_numeric_field() {
        let err = parse_frame("120,x40,2731,55,61\r\n").unwrap_err();
        assert!(matches!(err, BenchError::MalformedFrame { .. }));
    }

    #[test]
    fn frame_line_skips_short_chatter() {
        let mut reader = Cursor::new(b"ok\r\n120,340,2731,55,61\r\n".to_vec());
        let line = read_frame_line(&mut reader).unwrap();
        assert_eq!(line, "120,340,2731,55,61\r\n");
    }

    #[test]
    fn frame_line_reassembles_split_reads() {
        let mut reader = ChunkReader::new(&[b"120,34", b"0,2731,", b"55,61\r\n"]);
        let line = read_frame_line(&mut reader).unwrap();
        assert_eq!(line, "120,340,2731,55,61\r\n");
    }

    #[test]
    fn handshake_accepts_token_after_noise() {
        let mut reader = Cursor::new(b"boot\r\na\r\n".to_vec());
        assert!(wait_for_handshake(&mut reader, Duration::from_millis(200)).is_ok());
    }

    #[test]
    fn handshake_times_out_without_token() {
        let mut reader = Cursor::new(Vec::new());
        let err = wait_for_handshake(&mut reader, Duration::from_millis(20)).unwrap_err();
        assert!(matches!(err, BenchError::HandshakeTimeout(_)));
    }
}
