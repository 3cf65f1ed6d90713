//! Three-state field updates for partial-update requests.

/// One field of a partial update.
///
/// A plain `Option<T>` cannot tell "not sent" apart from "sent as null", and a
/// partial update has to leave the former untouched while clearing the latter.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldPatch<T> {
    /// Field absent from the request; keep the stored value.
    #[default]
    Unchanged,
    /// Field sent as explicit null.
    Clear,
    /// Field sent with a value.
    Set(T),
}

impl<T> FieldPatch<T> {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// The new value, if one was sent.
    #[must_use]
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unchanged | Self::Clear => None,
        }
    }

    /// Collapse into the value to store in a nullable column.
    ///
    /// `None` means "do not touch", `Some(None)` means "store null".
    #[must_use]
    pub fn into_nullable(self) -> Option<Option<T>> {
        match self {
            Self::Unchanged => None,
            Self::Clear => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }

    /// Overwrite `slot` according to this patch.
    pub fn apply_to(self, slot: &mut Option<T>) {
        if let Some(next) = self.into_nullable() {
            *slot = next;
        }
    }
}

impl<T> From<Option<Option<T>>> for FieldPatch<T> {
    fn from(value: Option<Option<T>>) -> Self {
        match value {
            None => Self::Unchanged,
            Some(None) => Self::Clear,
            Some(Some(value)) => Self::Set(value),
        }
    }
}
