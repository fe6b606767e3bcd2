//! Named on/off switches controlling what a frame draws

/// Ordered option name → flag map
///
/// The set of names is fixed at construction; the order is the display
/// order a UI would use. Unknown names are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawOptions {
    options: Vec<(String, bool)>,
}

impl DrawOptions {
    /// Create from `(name, initial value)` pairs
    ///
    /// Later duplicates of a name are dropped.
    pub fn new<K: Into<String>>(options: impl IntoIterator<Item = (K, bool)>) -> Self {
        let mut deduped: Vec<(String, bool)> = Vec::new();
        for (name, value) in options {
            let name = name.into();
            if deduped.iter().all(|(existing, _)| *existing != name) {
                deduped.push((name, value));
            }
        }
        Self { options: deduped }
    }

    /// Current value of an option
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.options
            .iter()
            .find(|(option, _)| option == name)
            .map(|(_, value)| *value)
    }

    /// Set an option; returns `false` (and changes nothing) for an unknown name
    pub fn set(&mut self, name: &str, value: bool) -> bool {
        if let Some((_, slot)) = self.options.iter_mut().find(|(option, _)| option == name) {
            *slot = value;
            true
        } else {
            log::warn!("Ignoring unknown draw option '{}'", name);
            false
        }
    }

    /// Flip an option, returning its new value
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let value = !self.get(name)?;
        self.set(name, value);
        Some(value)
    }

    /// Options in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.options.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of options
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether there are no options
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl From<Vec<(String, bool)>> for DrawOptions {
    fn from(options: Vec<(String, bool)>) -> Self {
        Self::new(options)
    }
}
