//! On-disk artifact store.
//!
//! One target directory holds exactly one identity: a private key, a
//! certificate signing request and a certificate. Existence queries are pure;
//! the directory is never checked for writability up front, so permission
//! problems only surface when a write is attempted.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use devtls_config::StoreConfig;
use tempfile::NamedTempFile;
use devtls_core::defaults;
use tracing::debug;

use crate::error::CertError;

/// The three artifacts a target directory can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Key,
    Request,
    Certificate,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [Self::Key, Self::Request, Self::Certificate];
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Key => "private key",
            Self::Request => "certificate signing request",
            Self::Certificate => "certificate",
        })
    }
}

/// File names of the artifacts inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    pub key_file: String,
    pub request_file: String,
    pub cert_file: String,
}

impl Default for StoreLayout {
    fn default() -> Self {
        Self {
            key_file: defaults::DEFAULT_KEY_FILE.to_string(),
            request_file: defaults::DEFAULT_REQUEST_FILE.to_string(),
            cert_file: defaults::DEFAULT_CERT_FILE.to_string(),
        }
    }
}

impl StoreLayout {
    fn file_name(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Key => &self.key_file,
            ArtifactKind::Request => &self.request_file,
            ArtifactKind::Certificate => &self.cert_file,
        }
    }
}

/// What happens when a write targets an artifact that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Replace silently. Existing artifacts are never backed up.
    #[default]
    Overwrite,
    /// Fail with [`CertError::AlreadyExists`].
    Refuse,
}

impl OverwritePolicy {
    pub fn from_flag(overwrite: bool) -> Self {
        if overwrite {
            Self::Overwrite
        } else {
            Self::Refuse
        }
    }
}

/// Classification of the (key, request, certificate) presence triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Empty,
    KeyOnly,
    KeyAndRequest,
    Full,
    /// A combination no sequence of operations produces, e.g. a request
    /// whose key was deleted out of band.
    Inconsistent {
        key: bool,
        request: bool,
        certificate: bool,
    },
}

impl LifecycleState {
    pub fn from_presence(key: bool, request: bool, certificate: bool) -> Self {
        match (key, request, certificate) {
            (false, false, false) => Self::Empty,
            (true, false, false) => Self::KeyOnly,
            (true, true, false) => Self::KeyAndRequest,
            (true, true, true) => Self::Full,
            _ => Self::Inconsistent {
                key,
                request,
                certificate,
            },
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::KeyOnly => f.write_str("key only"),
            Self::KeyAndRequest => f.write_str("key and request"),
            Self::Full => f.write_str("full"),
            Self::Inconsistent {
                key,
                request,
                certificate,
            } => write!(
                f,
                "inconsistent (key: {key}, request: {request}, certificate: {certificate})"
            ),
        }
    }
}

/// Resolves, reads and writes artifacts in a single target directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    target_dir: PathBuf,
    layout: StoreLayout,
    policy: OverwritePolicy,
}

impl ArtifactStore {
    /// Store over `target_dir` with the default layout and overwrite policy.
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            layout: StoreLayout::default(),
            policy: OverwritePolicy::default(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.target_dir)
            .with_layout(StoreLayout {
                key_file: config.key_file.clone(),
                request_file: config.request_file.clone(),
                cert_file: config.cert_file.clone(),
            })
            .with_policy(OverwritePolicy::from_flag(config.overwrite))
    }

    pub fn with_layout(mut self, layout: StoreLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_policy(mut self, policy: OverwritePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn policy(&self) -> OverwritePolicy {
        self.policy
    }

    pub fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.target_dir.join(self.layout.file_name(kind))
    }

    pub fn exists(&self, kind: ArtifactKind) -> bool {
        self.path(kind).is_file()
    }

    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_presence(
            self.exists(ArtifactKind::Key),
            self.exists(ArtifactKind::Request),
            self.exists(ArtifactKind::Certificate),
        )
    }

    pub fn read(&self, kind: ArtifactKind) -> Result<String, CertError> {
        let path = self.path(kind);
        fs::read_to_string(&path).map_err(|e| CertError::io(path, e))
    }

    /// Persist `pem` as the `kind` artifact and return its path.
    ///
    /// The content goes to a temporary file in the target directory which is
    /// then renamed over the artifact, so readers see either the old or the
    /// new file. On Unix the private key gets mode 0600; the request and the
    /// certificate are public and get 0644.
    pub fn write(&self, kind: ArtifactKind, pem: &str) -> Result<PathBuf, CertError> {
        let path = self.path(kind);
        if self.policy == OverwritePolicy::Refuse && path.exists() {
            return Err(CertError::AlreadyExists { path });
        }

        let mut file = tempfile::Builder::new()
            .prefix(".devtls-")
            .tempfile_in(&self.target_dir)
            .map_err(|e| CertError::io(&self.target_dir, e))?;
        set_permissions(file.as_file(), kind).map_err(|e| CertError::io(file.path(), e))?;
        file.write_all(pem.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| CertError::io(file.path(), e))?;

        persist(file, &path, self.policy)?;

        debug!(artifact = %kind, path = %path.display(), bytes = pem.len(), "artifact written");
        Ok(path)
    }
}

/// Rename `file` onto `path`. Under [`OverwritePolicy::Refuse`] an artifact
/// created after the existence check is left in place.
fn persist(file: NamedTempFile, path: &Path, policy: OverwritePolicy) -> Result<(), CertError> {
    let persisted = match policy {
        OverwritePolicy::Overwrite => file.persist(path),
        OverwritePolicy::Refuse => file.persist_noclobber(path),
    };
    persisted.map(drop).map_err(|e| match e.error.kind() {
        io::ErrorKind::AlreadyExists => CertError::AlreadyExists {
            path: path.to_path_buf(),
        },
        _ => CertError::io(path, e.error),
    })
}

#[cfg(unix)]
fn set_permissions(file: &fs::File, kind: ArtifactKind) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    // Temporary files start out as 0600 and keep that mode when persisted.
    let mode = match kind {
        ArtifactKind::Key => 0o600,
        ArtifactKind::Request | ArtifactKind::Certificate => 0o644,
    };
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_permissions(_file: &fs::File, _kind: ArtifactKind) -> io::Result<()> {
    Ok(())
}
