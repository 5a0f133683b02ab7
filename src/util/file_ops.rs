// File Operations for RSA Key Files and Streams
// Opens input/output streams and reads/writes key files

use crate::error::{Result, RsaError};
use crate::rsa::keyfile::{read_private_key, read_public_key, write_private_key, write_public_key};
use crate::rsa::keygen::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Open a file for reading, or stdin when no path is given
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin().lock()))),
    }
}

/// Create (truncate) a file for writing, or stdout when no path is given
pub fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Create a file readable and writable by the owner only
pub fn create_private_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(path)?;

    // mode() only applies to newly created files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    Ok(file)
}

/// Read a public key file
pub fn load_public_key(path: &Path) -> Result<RsaPublicKey> {
    read_public_key(BufReader::new(File::open(path)?))
}

/// Read a private key file
pub fn load_private_key(path: &Path) -> Result<RsaPrivateKey> {
    read_private_key(BufReader::new(File::open(path)?))
}

/// Write both key files; the public file is removed again if the private one fails
pub fn save_keypair(keypair: &RsaKeyPair, public_path: &Path, private_path: &Path) -> Result<()> {
    write_public_key(&keypair.public_key, BufWriter::new(File::create(public_path)?))?;

    let private = create_private_file(private_path)
        .map_err(RsaError::from)
        .and_then(|file| write_private_key(&keypair.private_key, BufWriter::new(file)));

    if let Err(e) = private {
        log::warn!(
            "removing {} after failing to write the private key",
            public_path.display()
        );
        let _ = fs::remove_file(public_path);
        return Err(e);
    }

    Ok(())
}
