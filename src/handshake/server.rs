//! The simple (non-digest) RTMP handshake.
//!
//! Defined by:
//! - Legacy RTMP spec, 5.2

use std::io::{self, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use rand::Rng;
use scuffle_bytes_util::BytesCursorExt;

use super::define::{RTMP_HANDSHAKE_SIZE, ServerHandshakeState, TIME_VERSION_LENGTH};
use super::error::HandshakeError;

fn current_time() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(0)
}

/// Drives the server side of the simple RTMP handshake: reads C0/C1, replies with S0/S1/S2,
/// then reads C2.
///
/// Defined by:
/// - Legacy RTMP spec, 5.2
pub struct HandshakeServer {
    state: ServerHandshakeState,
    /// The full 1536 bytes of C1, kept verbatim so S2 can echo them byte-for-byte.
    c1_bytes: Bytes,
}

impl Default for HandshakeServer {
    fn default() -> Self {
        Self {
            state: ServerHandshakeState::ReadC0C1,
            c1_bytes: Bytes::new(),
        }
    }
}

impl HandshakeServer {
    /// Whether the handshake has completed (C2 has been read).
    pub fn is_finished(&self) -> bool {
        self.state == ServerHandshakeState::Finish
    }

    /// Drives one step of the handshake: reads whatever `input` holds for the current state and
    /// appends the server's reply to `output`.
    pub fn handshake(&mut self, input: &mut io::Cursor<Bytes>, output: &mut Vec<u8>) -> Result<(), HandshakeError> {
        match self.state {
            ServerHandshakeState::ReadC0C1 => {
                self.read_c0(input)?;
                self.read_c1(input)?;
                self.write_s0(output)?;
                self.write_s1(output)?;
                self.write_s2(output)?;
                self.state = ServerHandshakeState::ReadC2;
            }
            ServerHandshakeState::ReadC2 => {
                self.read_c2(input)?;
                self.state = ServerHandshakeState::Finish;
            }
            ServerHandshakeState::Finish => {}
        }

        Ok(())
    }

    fn read_c0(&mut self, input: &mut io::Cursor<Bytes>) -> Result<(), HandshakeError> {
        let version = input.read_u8()?;
        if version != 3 {
            return Err(HandshakeError::BadVersion(version));
        }
        Ok(())
    }

    fn read_c1(&mut self, input: &mut io::Cursor<Bytes>) -> Result<(), HandshakeError> {
        // Kept whole (not split into timestamp/zero/random) so `write_s2` can echo it
        // byte-for-byte, including the timestamp and zero fields.
        self.c1_bytes = input.extract_bytes(RTMP_HANDSHAKE_SIZE)?;
        Ok(())
    }

    fn read_c2(&mut self, input: &mut io::Cursor<Bytes>) -> Result<(), HandshakeError> {
        // C2 echoes S1; we don't verify it, since non-compliant clients routinely get this
        // wrong and there is nothing to gain from rejecting them.
        input.extract_bytes(RTMP_HANDSHAKE_SIZE)?;
        Ok(())
    }

    fn write_s0(&mut self, output: &mut Vec<u8>) -> Result<(), HandshakeError> {
        output.write_u8(3)?;
        Ok(())
    }

    fn write_s1(&mut self, output: &mut Vec<u8>) -> Result<(), HandshakeError> {
        output.write_u32::<BigEndian>(current_time())?;
        output.write_u32::<BigEndian>(0)?;

        let mut rng = rand::rng();
        for _ in 0..RTMP_HANDSHAKE_SIZE - TIME_VERSION_LENGTH {
            output.write_u8(rng.random())?;
        }

        Ok(())
    }

    fn write_s2(&mut self, output: &mut Vec<u8>) -> Result<(), HandshakeError> {
        // S2 echoes C1 byte-for-byte, per the simple handshake: no field of it is recomputed.
        output.write_all(&self.c1_bytes[..])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    fn sample_c0c1(timestamp: u32) -> Bytes {
        let mut buf = Vec::with_capacity(RTMP_HANDSHAKE_SIZE + 1);
        buf.write_u8(3).unwrap();
        buf.write_u32::<BigEndian>(timestamp).unwrap();
        buf.write_u32::<BigEndian>(0).unwrap();
        for i in 0..(RTMP_HANDSHAKE_SIZE - TIME_VERSION_LENGTH) {
            buf.write_u8((i % 256) as u8).unwrap();
        }
        Bytes::from(buf)
    }

    #[test]
    fn full_handshake_round_trip() {
        let mut server = HandshakeServer::default();
        let c0c1 = sample_c0c1(123);
        let c1 = c0c1.slice(1..);

        let mut output = Vec::new();
        server.handshake(&mut io::Cursor::new(c0c1.clone()), &mut output).unwrap();
        assert_eq!(server.state, ServerHandshakeState::ReadC2);

        let mut reader = io::Cursor::new(output);
        assert_eq!(reader.read_u8().unwrap(), 3);
        let s1_timestamp = reader.read_u32::<BigEndian>().unwrap();
        assert_eq!(reader.read_u32::<BigEndian>().unwrap(), 0);

        let mut s1_random = vec![0u8; RTMP_HANDSHAKE_SIZE - TIME_VERSION_LENGTH];
        reader.read_exact(&mut s1_random).unwrap();

        // S2 must equal C1 byte-for-byte, including the timestamp and zero fields.
        let mut s2 = vec![0u8; RTMP_HANDSHAKE_SIZE];
        reader.read_exact(&mut s2).unwrap();
        assert_eq!(&c1[..], &s2[..]);

        let mut c2 = Vec::with_capacity(RTMP_HANDSHAKE_SIZE);
        c2.write_u32::<BigEndian>(s1_timestamp).unwrap();
        c2.write_u32::<BigEndian>(124).unwrap();
        c2.write_all(&s1_random).unwrap();

        let mut output = Vec::new();
        server.handshake(&mut io::Cursor::new(Bytes::from(c2)), &mut output).unwrap();
        assert!(server.is_finished());
    }

    #[test]
    fn rejects_bad_c0_version() {
        let mut server = HandshakeServer::default();

        let mut c0c1 = Vec::new();
        c0c1.write_u8(6).unwrap();
        c0c1.write_u32::<BigEndian>(0).unwrap();
        c0c1.write_u32::<BigEndian>(0).unwrap();
        c0c1.extend(vec![0u8; RTMP_HANDSHAKE_SIZE - TIME_VERSION_LENGTH]);

        let mut output = Vec::new();
        let err = server
            .handshake(&mut io::Cursor::new(Bytes::from(c0c1)), &mut output)
            .unwrap_err();

        assert!(matches!(err, HandshakeError::BadVersion(6)));
    }
}
