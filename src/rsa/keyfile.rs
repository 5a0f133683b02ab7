// Key File Format
// Public key: n, e, signature (hex) and identity, one per line
// Private key: n and d (hex), one per line

use super::bigint::{parse_hex, to_hex, RsaBigInt};
use super::keygen::{RsaPrivateKey, RsaPublicKey};
use crate::error::{Result, RsaError};
use std::io::{BufRead, Lines, Write};

/// Write a public key in the four-line text format
pub fn write_public_key<W: Write>(key: &RsaPublicKey, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", to_hex(&key.n))?;
    writeln!(writer, "{}", to_hex(&key.e))?;
    writeln!(writer, "{}", to_hex(&key.signature))?;
    writeln!(writer, "{}", key.identity)?;
    writer.flush()?;
    Ok(())
}

/// Write a private key in the two-line text format
pub fn write_private_key<W: Write>(key: &RsaPrivateKey, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", to_hex(&key.n))?;
    writeln!(writer, "{}", to_hex(&key.d))?;
    writer.flush()?;
    Ok(())
}

struct FieldReader<R> {
    lines: Lines<R>,
    key: &'static str,
}

impl<R: BufRead> FieldReader<R> {
    fn new(reader: R, key: &'static str) -> Self {
        Self {
            lines: reader.lines(),
            key,
        }
    }

    fn text(&mut self, field: &'static str) -> Result<String> {
        match self.lines.next() {
            Some(line) => {
                let line = line?;
                if line.is_empty() {
                    return Err(RsaError::MissingField { key: self.key, field });
                }
                Ok(line)
            }
            None => Err(RsaError::MissingField { key: self.key, field }),
        }
    }

    fn hex(&mut self, field: &'static str) -> Result<RsaBigInt> {
        let line = self.text(field)?;
        parse_hex(&line, &format!("{} key field `{}`", self.key, field))
    }
}

/// Read a public key; fields are n, e, signature, identity in that order
pub fn read_public_key<R: BufRead>(reader: R) -> Result<RsaPublicKey> {
    let mut fields = FieldReader::new(reader, "public");
    let n = fields.hex("n")?;
    let e = fields.hex("e")?;
    let signature = fields.hex("signature")?;
    let identity = fields.text("identity")?;

    Ok(RsaPublicKey {
        n,
        e,
        signature,
        identity,
    })
}

/// Read a private key; fields are n, d in that order
pub fn read_private_key<R: BufRead>(reader: R) -> Result<RsaPrivateKey> {
    let mut fields = FieldReader::new(reader, "private");
    let n = fields.hex("n")?;
    let d = fields.hex("d")?;

    Ok(RsaPrivateKey { n, d })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::generate_keypair;
    use crate::rsa::randstate::rand_state;

    #[test]
    fn test_public_key_layout() {
        let key = RsaPublicKey {
            n: from_u64(0xca1),
            e: from_u64(0x11),
            signature: from_u64(0xabc),
            identity: "alice".to_string(),
        };
        let mut out = Vec::new();
        write_public_key(&key, &mut out).unwrap();
        assert_eq!(out, b"ca1\n11\nabc\nalice\n");
    }

    #[test]
    fn test_private_key_layout() {
        let key = RsaPrivateKey {
            n: from_u64(0xca1),
            d: from_u64(0x19d),
        };
        let mut out = Vec::new();
        write_private_key(&key, &mut out).unwrap();
        assert_eq!(out, b"ca1\n19d\n");
    }

    #[test]
    fn test_key_file_roundtrip() {
        let mut rng = rand_state(51);
        let keypair = generate_keypair(256, 20, "john.doe", &mut rng).unwrap();

        let mut public = Vec::new();
        write_public_key(&keypair.public_key, &mut public).unwrap();
        assert_eq!(read_public_key(public.as_slice()).unwrap(), keypair.public_key);

        let mut private = Vec::new();
        write_private_key(&keypair.private_key, &mut private).unwrap();
        assert_eq!(read_private_key(private.as_slice()).unwrap(), keypair.private_key);
    }

    #[test]
    fn test_read_accepts_uppercase_and_crlf() {
        let key = read_public_key(&b"CA1\r\n11\r\nABC\r\nalice\r\n"[..]).unwrap();
        assert_eq!(key.n, from_u64(0xca1));
        assert_eq!(key.signature, from_u64(0xabc));
        assert_eq!(key.identity, "alice");
    }

    #[test]
    fn test_identity_keeps_spaces() {
        let key = read_public_key(&b"ca1\n11\nabc\nAlice Liddell\n"[..]).unwrap();
        assert_eq!(key.identity, "Alice Liddell");
    }

    #[test]
    fn test_missing_fields() {
        assert!(matches!(
            read_public_key(&b"ca1\n11\n"[..]),
            Err(RsaError::MissingField { key: "public", field: "signature" })
        ));
        assert!(matches!(
            read_public_key(&b"ca1\n11\nabc\n"[..]),
            Err(RsaError::MissingField { key: "public", field: "identity" })
        ));
        assert!(matches!(
            read_private_key(&b"ca1\n"[..]),
            Err(RsaError::MissingField { key: "private", field: "d" })
        ));
    }

    #[test]
    fn test_malformed_hex_field() {
        assert!(matches!(
            read_private_key(&b"ca1\nxyz\n"[..]),
            Err(RsaError::InvalidHex { .. })
        ));
    }
}
