// -----------------------------------------------------------------------------
// FieldFlags

/// Per-field metadata consumed by the traversal engine.
///
/// Authored through `#[field(...)]` attributes on a `#[derive(Reflect)]`
/// struct and stored in each [`FieldInfo`](crate::info::FieldInfo):
///
/// ```
/// use sg_reflect::derive::Reflect;
///
/// #[derive(Reflect, Clone, Default)]
/// struct Settings {
///     #[field(persist = 0, editor, copy)]
///     volume: f32,
///     #[field(skip)]
///     dirty: bool,
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldFlags {
    /// Persistence id: the compact key this field serializes under.
    pub persist: Option<u16>,
    /// Shown in the editor's property panels.
    pub editor: bool,
    /// Participates in structural copies.
    pub copy: bool,
    /// Excluded from every traversal, even [`InclusionMode::All`].
    pub ignored: bool,
    /// Copied by aliasing the value handle instead of recursing into it.
    pub by_reference: bool,
}

impl FieldFlags {
    /// Creates empty flags: not persisted, not editor-visible, not copyable.
    #[inline]
    pub const fn new() -> Self {
        Self {
            persist: None,
            editor: false,
            copy: false,
            ignored: false,
            by_reference: false,
        }
    }

    /// Marks the field as persisted under the given id.
    #[inline]
    pub const fn persisted(mut self, id: u16) -> Self {
        self.persist = Some(id);
        self
    }

    /// Marks the field as editor-visible.
    #[inline]
    pub const fn editor(mut self) -> Self {
        self.editor = true;
        self
    }

    /// Marks the field as copy-eligible.
    #[inline]
    pub const fn copyable(mut self) -> Self {
        self.copy = true;
        self
    }

    /// Excludes the field from every traversal.
    #[inline]
    pub const fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Marks the field as copy-by-reference.
    #[inline]
    pub const fn by_reference(mut self) -> Self {
        self.by_reference = true;
        self
    }
}

// -----------------------------------------------------------------------------
// InclusionMode

/// Selects which fields a class exposes to a traversal.
///
/// Every walk interrogates fields through exactly one mode; the mode never
/// changes mid-traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InclusionMode {
    /// Only fields carrying a persistence id.
    Persisted,
    /// Only fields marked editor-visible.
    EditorVisible,
    /// Only fields marked copy-eligible.
    CopyEligible,
    /// Everything except explicitly ignored fields.
    All,
}

impl InclusionMode {
    /// Returns whether a field with the given flags is visited in this mode.
    ///
    /// Ignored fields are excluded in every mode.
    #[inline]
    pub const fn includes(self, flags: &FieldFlags) -> bool {
        if flags.ignored {
            return false;
        }
        match self {
            Self::Persisted => flags.persist.is_some(),
            Self::EditorVisible => flags.editor,
            Self::CopyEligible => flags.copy,
            Self::All => true,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{FieldFlags, InclusionMode};

    #[test]
    fn inclusion() {
        let persisted = FieldFlags::new().persisted(3).editor();
        let editor_only = FieldFlags::new().editor();
        let ignored = FieldFlags::new().persisted(4).ignored();

        assert!(InclusionMode::Persisted.includes(&persisted));
        assert!(!InclusionMode::Persisted.includes(&editor_only));
        assert!(InclusionMode::EditorVisible.includes(&editor_only));
        assert!(!InclusionMode::CopyEligible.includes(&editor_only));
        assert!(InclusionMode::All.includes(&editor_only));

        // `ignored` wins over everything, including `All`.
        assert!(!InclusionMode::Persisted.includes(&ignored));
        assert!(!InclusionMode::All.includes(&ignored));
    }
}
