use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::employee::Employee;
use crate::properties::Properties;
use crate::result::{DecodeError, FacsimileError, FacsimileResult};

/// Format tag at the start of every blob.
pub const MAGIC: [u8; 4] = *b"FCSM";
/// Payload layout written by [`encode`].
pub const FORMAT_VERSION: u16 = 1;
/// Default upper bound on the bytes a single decode may consume. Encoding is unbounded.
pub const DEFAULT_LIMIT: u64 = 1 << 20;

#[derive(Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u16,
}

/// Version 1 layout of an [`Employee`].
#[derive(Serialize, Deserialize)]
struct EmployeeV1 {
    id: i32,
    name: Option<String>,
    password: Option<String>,
    properties: Option<BTreeMap<String, String>>,
}

impl From<&Employee> for EmployeeV1 {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id(),
            name: employee.name().map(str::to_owned),
            password: employee.password().map(str::to_owned),
            properties: employee.properties().map(Properties::snapshot),
        }
    }
}

impl From<EmployeeV1> for Employee {
    fn from(stored: EmployeeV1) -> Self {
        let mut employee = Employee::default();
        employee.set_id(stored.id);
        employee.set_name(stored.name);
        employee.set_password(stored.password);
        employee.set_properties(stored.properties.map(Properties::from));
        employee
    }
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
        .allow_trailing_bytes()
}

/// Encode one record as a tagged, versioned blob.
pub fn encode(employee: &Employee) -> FacsimileResult<Vec<u8>> {
    let header = Header {
        magic: MAGIC,
        version: FORMAT_VERSION,
    };

    options()
        .serialize(&(header, EmployeeV1::from(employee)))
        .map_err(FacsimileError::Encode)
}

/// Decode a blob written by [`encode`].
pub fn decode(bytes: &[u8]) -> FacsimileResult<Employee> {
    decode_with_limit(bytes, DEFAULT_LIMIT)
}

/// [`decode`] with an explicit byte limit.
pub fn decode_with_limit(bytes: &[u8], limit: u64) -> FacsimileResult<Employee> {
    let mut payload = bytes;
    let header: Header = options()
        .with_limit(limit)
        .deserialize_from(&mut payload)
        .map_err(DecodeError::Malformed)?;

    if header.magic != MAGIC {
        return Err(DecodeError::BadMagic(header.magic).into());
    }

    match header.version {
        1 => {
            let stored: EmployeeV1 = options()
                .with_limit(limit)
                .deserialize_from(&mut payload)
                .map_err(DecodeError::Malformed)?;

            if !payload.is_empty() {
                return Err(DecodeError::TrailingBytes(payload.len()).into());
            }

            Ok(stored.into())
        }
        version => Err(DecodeError::UnsupportedVersion(version).into()),
    }
}

/// A file holding exactly one encoded record.
#[derive(Debug, Clone)]
pub struct Archive {
    path: PathBuf,
    limit: u64,
}

impl Archive {
    /// Create an archive handle for `path`. Nothing is touched on disk until
    /// [`Archive::store`] or [`Archive::load`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Override the decode limit in bytes.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `employee`, replacing whatever the file held.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be encoded or the file could not be written.
    pub fn store(&self, employee: &Employee) -> FacsimileResult<()> {
        let bytes = encode(employee)?;
        fs::write(&self.path, &bytes)?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "stored record");
        Ok(())
    }

    /// Read back the record written by [`Archive::store`].
    ///
    /// # Errors
    ///
    /// Returns [`FacsimileError::Io`] if the file could not be read and
    /// [`FacsimileError::Decode`] if its content is not a valid blob.
    pub fn load(&self) -> FacsimileResult<Employee> {
        let bytes = fs::read(&self.path)?;
        let employee = decode_with_limit(&bytes, self.limit)?;

        tracing::debug!(path = %self.path.display(), id = employee.id(), "loaded record");
        Ok(employee)
    }
}
