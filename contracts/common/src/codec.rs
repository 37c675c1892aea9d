//! Account byte layout.
//!
//! Every account starts with an 8-byte type discriminator followed by its
//! fields in declared order. Integers are little-endian, booleans are a single
//! `0`/`1` byte, identities are fixed-width StrKey bytes, and variable-length
//! data is prefixed with a 4-byte count.

use soroban_sdk::{Address, Bytes, Env, Vec};

use crate::identity::{identity_bytes, identity_from_bytes, IDENTITY_LEN};
use crate::CommonError;

pub const DISCRIMINATOR_LEN: usize = 8;

/// First eight bytes of `sha256("account:" ‖ name)`.
pub fn discriminator(env: &Env, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let mut preimage = Bytes::from_slice(env, b"account:");
    preimage.extend_from_slice(name.as_bytes());
    let digest = env.crypto().sha256(&preimage).to_array();
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// Append-only encoder over a host `Bytes` buffer.
pub struct Writer {
    buf: Bytes,
}

impl Writer {
    pub fn new(env: &Env) -> Self {
        Self {
            buf: Bytes::new(env),
        }
    }

    pub fn put_discriminator(&mut self, tag: &[u8; DISCRIMINATOR_LEN]) {
        self.buf.extend_from_array(tag);
    }

    pub fn put_bool(&mut self, value: bool) {
        self.buf.push_back(u8::from(value));
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_array(&value.to_le_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_array(&value.to_le_bytes());
    }

    pub fn put_identity(&mut self, identity: &Address) -> Result<(), CommonError> {
        self.buf.extend_from_array(&identity_bytes(identity)?);
        Ok(())
    }

    /// Writes a count-prefixed sequence of identities.
    pub fn put_identities(&mut self, identities: &Vec<Address>) -> Result<(), CommonError> {
        self.put_u32(identities.len());
        for identity in identities.iter() {
            self.put_identity(&identity)?;
        }
        Ok(())
    }

    /// Writes a length-prefixed opaque blob.
    pub fn put_bytes(&mut self, data: &Bytes) {
        self.put_u32(data.len());
        self.buf.append(data);
    }

    pub fn finish(self) -> Bytes {
        self.buf
    }
}

/// Cursor-based decoder. Every read is bounds-checked and fails with
/// [`CommonError::MalformedAccount`] instead of trapping.
pub struct Reader<'a> {
    env: &'a Env,
    data: &'a Bytes,
    pos: u32,
}

impl<'a> Reader<'a> {
    pub fn new(env: &'a Env, data: &'a Bytes) -> Self {
        Self { env, data, pos: 0 }
    }

    fn advance(&mut self, len: u32) -> Result<(u32, u32), CommonError> {
        let start = self.pos;
        let end = start
            .checked_add(len)
            .ok_or(CommonError::MalformedAccount)?;
        if end > self.data.len() {
            return Err(CommonError::MalformedAccount);
        }
        self.pos = end;
        Ok((start, end))
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], CommonError> {
        let (start, end) = self.advance(N as u32)?;
        let mut out = [0u8; N];
        self.data.slice(start..end).copy_into_slice(&mut out);
        Ok(out)
    }

    pub fn read_discriminator(&mut self) -> Result<[u8; DISCRIMINATOR_LEN], CommonError> {
        self.take::<DISCRIMINATOR_LEN>()
    }

    pub fn read_bool(&mut self) -> Result<bool, CommonError> {
        match self.take::<1>()?[0] {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(CommonError::MalformedAccount),
        }
    }

    pub fn read_u32(&mut self) -> Result<u32, CommonError> {
        Ok(u32::from_le_bytes(self.take::<4>()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, CommonError> {
        Ok(u64::from_le_bytes(self.take::<8>()?))
    }

    pub fn read_identity(&mut self) -> Result<Address, CommonError> {
        let raw = self.take::<IDENTITY_LEN>()?;
        identity_from_bytes(self.env, &raw)
    }

    /// Reads a count-prefixed identity sequence holding at most `max_count` items.
    pub fn read_identities(&mut self, max_count: u32) -> Result<Vec<Address>, CommonError> {
        let count = self.read_u32()?;
        if count > max_count {
            return Err(CommonError::MalformedAccount);
        }
        let mut out = Vec::new(self.env);
        for _ in 0..count {
            out.push_back(self.read_identity()?);
        }
        Ok(out)
    }

    /// Reads a length-prefixed blob of at most `max_len` bytes.
    pub fn read_bytes(&mut self, max_len: u32) -> Result<Bytes, CommonError> {
        let len = self.read_u32()?;
        if len > max_len {
            return Err(CommonError::MalformedAccount);
        }
        let (start, end) = self.advance(len)?;
        Ok(self.data.slice(start..end))
    }

    /// Fails if any bytes remain unread.
    pub fn finish(self) -> Result<(), CommonError> {
        if self.pos != self.data.len() {
            return Err(CommonError::MalformedAccount);
        }
        Ok(())
    }
}
