//! Version set resolution.

use cimatrix_core::{Error, Language, Result, VersionSet};
use tracing::debug;

/// Builds version sets from named presets and `lang=version` overlays.
#[derive(Debug, Clone)]
pub struct VersionSetResolver {
    baseline: VersionSet,
}

impl VersionSetResolver {
    pub fn new() -> Self {
        Self {
            baseline: VersionSet::minimum(),
        }
    }

    /// Look up a built-in set by name.
    pub fn named(&self, name: &str) -> Result<VersionSet> {
        match name {
            VersionSet::MINIMUM => Ok(VersionSet::minimum()),
            VersionSet::CURRENT => Ok(VersionSet::current()),
            other => Err(Error::UnknownVersionSet(other.to_string())),
        }
    }

    /// Overlay a `lang=version,lang=version` spec onto the baseline.
    ///
    /// Languages absent from the spec keep the baseline version, so the
    /// result always covers every known language.
    pub fn custom(&self, spec: &str) -> Result<VersionSet> {
        let mut set = self.baseline.clone();
        for pair in spec.split(',') {
            let (lang, version) = pair
                .split_once('=')
                .ok_or_else(|| Error::InvalidVersionSpec(spec.to_string()))?;
            let (lang, version) = (lang.trim(), version.trim());
            if version.is_empty() || version.contains('=') {
                return Err(Error::InvalidVersionSpec(spec.to_string()));
            }
            let language: Language = lang.parse()?;
            set.set(language, version);
        }
        debug!(spec, resolved = %set.to_spec(), "Resolved custom version set");
        Ok(set)
    }

    /// Named sets first, then custom sets, both in input order.
    ///
    /// Duplicates are kept; each entry becomes its own matrix row.
    pub fn resolve<N, C>(&self, named: &[N], custom: &[C]) -> Result<Vec<VersionSet>>
    where
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut sets = Vec::with_capacity(named.len() + custom.len());
        for name in named {
            sets.push(self.named(name.as_ref())?);
        }
        for spec in custom {
            sets.push(self.custom(spec.as_ref())?);
        }
        Ok(sets)
    }

    /// Resolve and require exactly one resulting set.
    pub fn resolve_single<N, C>(&self, named: &[N], custom: &[C]) -> Result<VersionSet>
    where
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut sets = self.resolve(named, custom)?;
        match sets.len() {
            1 => Ok(sets.remove(0)),
            n => Err(Error::VersionSetCount(n)),
        }
    }
}

impl Default for VersionSetResolver {
    fn default() -> Self {
        Self::new()
    }
}
