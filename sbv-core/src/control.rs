//! A slider with decrement/increment buttons around one dimension index.

/// Position of a slider widget, clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    position: usize,
    max: usize,
}

impl Slider {
    #[must_use]
    pub fn new(position: usize, max: usize) -> Self {
        Self {
            position: position.min(max),
            max,
        }
    }

    #[must_use]
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Move the slider, returning the clamped position.
    pub fn set(&mut self, position: usize) -> usize {
        self.position = position.min(self.max);
        self.position
    }
}

/// The two buttons attached to every control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// `-`
    Decrement,
    /// `+`
    Increment,
}

/// One navigable dimension: a slider, a `-` and a `+` button, and the
/// committed index.
///
/// The committed value only changes through [`Control::update`], which is
/// called by the control manager when the slider emits a change.
#[derive(Debug, Clone)]
pub struct Control {
    label: String,
    slider: Slider,
    value: usize,
    limit: usize,
}

impl Control {
    /// Create a control over `0..limit` starting at `initial`.
    ///
    /// `limit` is the dimension length; a zero limit is treated as 1 and
    /// `initial` is clamped into range.
    #[must_use]
    pub fn new(label: impl Into<String>, initial: usize, limit: usize) -> Self {
        let limit = limit.max(1);
        let slider = Slider::new(initial, limit - 1);
        Self {
            label: label.into(),
            value: slider.position(),
            slider,
            limit,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Committed index.
    #[must_use]
    #[inline]
    pub fn value(&self) -> usize {
        self.value
    }

    /// Dimension length; valid indices are `0..limit`.
    #[must_use]
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn slider(&self) -> Slider {
        self.slider
    }

    /// Move the slider. Always counts as a change, even to the same position.
    ///
    /// Returns the clamped position to report to listeners.
    pub fn set_slider(&mut self, position: usize) -> usize {
        self.slider.set(position)
    }

    /// Move the slider back onto the committed value without emitting.
    pub(crate) fn reset_slider(&mut self) {
        self.slider.set(self.value);
    }

    /// Step one index down. Returns the emitted slider position, or `None`
    /// at 0.
    pub fn decrement(&mut self) -> Option<usize> {
        let new_value = self.value.checked_sub(1)?;
        Some(self.set_slider(new_value))
    }

    /// Step one index up. Returns the emitted slider position, or `None`
    /// at `limit - 1`.
    pub fn increment(&mut self) -> Option<usize> {
        let new_value = self.value + 1;
        if new_value < self.limit {
            Some(self.set_slider(new_value))
        } else {
            None
        }
    }

    /// Run the built-in handler of `button`.
    pub fn press(&mut self, button: Button) -> Option<usize> {
        match button {
            Button::Decrement => self.decrement(),
            Button::Increment => self.increment(),
        }
    }

    /// Commit `value`, then run `callback` with it.
    pub fn update<F, R>(&mut self, value: usize, callback: F) -> R
    where
        F: FnOnce(usize) -> R,
    {
        self.value = self.slider.set(value);
        callback(self.value)
    }
}
