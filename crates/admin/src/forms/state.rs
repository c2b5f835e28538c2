//! Generic change-tracked form state.

/// Form data that can be changed one named field at a time.
pub trait FormData {
    /// Identifies a single field.
    type Field: Copy;

    /// Replace one field.
    fn set(&mut self, field: Self::Field, value: String);
}

/// Current form data plus a "has anything been changed" flag.
///
/// The flag is sticky: it is set by the first change event and stays set even
/// if a later change restores the seeded value. Only dropping the form (cancel
/// or remount) clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<T> {
    data: T,
    has_changed: bool,
}

impl<T: FormData> FormState<T> {
    /// Seed the form. Later changes to the source record are not picked up.
    #[must_use]
    pub const fn new(initial: T) -> Self {
        Self {
            data: initial,
            has_changed: false,
        }
    }

    /// Apply one change event.
    pub fn change(&mut self, field: T::Field, value: impl Into<String>) {
        self.data.set(field, value.into());
        self.has_changed = true;
    }

    /// Current data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Whether any change event has been applied since seeding.
    #[must_use]
    pub const fn has_changed(&self) -> bool {
        self.has_changed
    }
}
