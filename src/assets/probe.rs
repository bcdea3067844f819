use std::path::{Path, PathBuf};

use tracing::warn;

use crate::foundation::{
    core::ImageRef,
    error::{GlitchError, GlitchResult},
};

/// Decides whether an image source can be displayed.
///
/// The compositor asks once per layer at build time; unavailable sources
/// degrade to a transparent layer instead of failing the composition.
pub trait SourceProbe {
    fn is_available(&self, src: &ImageRef) -> bool;
}

/// Treats every non-blank source as loadable. Used when the host does its own loading.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssumeAvailable;

impl SourceProbe for AssumeAvailable {
    fn is_available(&self, src: &ImageRef) -> bool {
        !src.is_blank()
    }
}

/// Checks local sources under an asset root by reading their image header.
///
/// Remote references (`scheme://`, `data:`, `blob:`) cannot be checked from
/// here and are assumed available.
#[derive(Clone, Debug)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path for `src` under the root, or `None` for remote references.
    ///
    /// A leading `/` addresses the root itself. Paths that climb out of the
    /// root are rejected.
    pub fn resolve(&self, src: &ImageRef) -> GlitchResult<Option<PathBuf>> {
        let s = src.as_str().trim();
        if is_remote(s) {
            return Ok(None);
        }
        let rel = normalize_rel_path(s.trim_start_matches(['/', '\\']))?;
        Ok(Some(self.root.join(rel)))
    }
}

impl SourceProbe for FsProbe {
    fn is_available(&self, src: &ImageRef) -> bool {
        if src.is_blank() {
            return false;
        }
        match self.resolve(src) {
            Ok(None) => true,
            Ok(Some(path)) => image::image_dimensions(&path).is_ok(),
            Err(err) => {
                warn!(source = %src, %err, "rejected local image path");
                false
            }
        }
    }
}

/// Normalize a root-relative asset path.
///
/// Separators become `/`, empty and `.` segments are dropped, and absolute
/// paths or `..` segments are rejected.
pub fn normalize_rel_path(source: &str) -> GlitchResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(GlitchError::validation("asset paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(GlitchError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(GlitchError::validation("asset path must contain a file name"));
    }
    Ok(out.join("/"))
}

fn is_remote(s: &str) -> bool {
    s.contains("://") || s.starts_with("data:") || s.starts_with("blob:")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/probe.rs"]
mod tests;
