//! Control registry and event dispatch.
//!
//! The [`ControlManager`] owns named controls and display surfaces. Linking a
//! control attaches a callback that runs every time the control's slider
//! emits a change: the manager first commits the new value on the control,
//! then calls the callback with it.
//!
//! Events are queued and drained in order on the calling thread. A callback
//! that moves another slider (through [`Dispatch::set_slider`]) enqueues a
//! change event which runs after the current callback returns.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use ndarray::Array2;

use crate::control::{Button, Control};
use crate::error::{Error, Result};

/// Callback bound to a control's change event.
pub type Callback<K> = Box<dyn FnMut(usize, &mut Dispatch<'_, K>) -> Result<()>>;

/// A 2D image buffer shown in one view.
///
/// The buffer shape is fixed at creation. Every replacement bumps the
/// revision so renderers know to redraw.
#[derive(Debug, Clone)]
pub struct Display {
    data: Array2<f32>,
    revision: u64,
}

impl Display {
    #[must_use]
    pub fn new(data: Array2<f32>) -> Self {
        Self { data, revision: 0 }
    }

    /// Current buffer, indexed `[column, row]`.
    #[must_use]
    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    /// Buffer shape as `(columns, rows)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    #[must_use]
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn replace(&mut self, name: String, data: Array2<f32>) -> Result<()> {
        if data.dim() != self.data.dim() {
            return Err(Error::DisplayShapeMismatch {
                name,
                expected: self.data.dim(),
                actual: data.dim(),
            });
        }
        self.data = data;
        self.revision += 1;
        Ok(())
    }
}

/// Handle passed to callbacks while an event is being dispatched.
pub struct Dispatch<'a, K> {
    controls: &'a mut HashMap<K, Control>,
    displays: &'a mut HashMap<K, Display>,
    queue: &'a mut VecDeque<(K, usize)>,
}

impl<K> Dispatch<'_, K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Look up a control.
    ///
    /// # Errors
    /// Returns an error if no control is registered under `key`.
    pub fn control(&self, key: &K) -> Result<&Control> {
        self.controls
            .get(key)
            .ok_or_else(|| Error::UnknownControl(format!("{key:?}")))
    }

    /// Committed value of a control.
    ///
    /// # Errors
    /// Returns an error if no control is registered under `key`.
    pub fn value(&self, key: &K) -> Result<usize> {
        self.control(key).map(Control::value)
    }

    /// Move a control's slider. Its change event runs after the current
    /// callback returns.
    ///
    /// # Errors
    /// Returns an error if no control is registered under `key`.
    pub fn set_slider(&mut self, key: &K, position: usize) -> Result<()> {
        let control = self
            .controls
            .get_mut(key)
            .ok_or_else(|| Error::UnknownControl(format!("{key:?}")))?;
        let position = control.set_slider(position);
        self.queue.push_back((key.clone(), position));
        Ok(())
    }

    /// Replace a display's buffer and request a redraw.
    ///
    /// # Errors
    /// Returns an error if the display is unknown or `data` has a different
    /// shape.
    pub fn update(&mut self, display: &K, data: Array2<f32>) -> Result<()> {
        replace_display(self.displays, display, data)
    }
}

fn replace_display<K>(displays: &mut HashMap<K, Display>, key: &K, data: Array2<f32>) -> Result<()>
where
    K: Eq + Hash + Debug,
{
    let name = format!("{key:?}");
    let display = displays
        .get_mut(key)
        .ok_or_else(|| Error::UnknownDisplay(name.clone()))?;
    display.replace(name, data)
}

/// Registry of named controls and displays with their linked callbacks.
pub struct ControlManager<K> {
    controls: HashMap<K, Control>,
    displays: HashMap<K, Display>,
    links: HashMap<K, Callback<K>>,
    queue: VecDeque<(K, usize)>,
}

impl<K> Default for ControlManager<K> {
    fn default() -> Self {
        Self {
            controls: HashMap::new(),
            displays: HashMap::new(),
            links: HashMap::new(),
            queue: VecDeque::new(),
        }
    }
}

impl<K> ControlManager<K>
where
    K: Eq + Hash + Clone + Debug,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a control, replacing any previous one under `key`.
    pub fn add_control(&mut self, key: K, control: Control) {
        self.controls.insert(key, control);
    }

    /// Register a display surface with its initial buffer.
    pub fn add_display(&mut self, key: K, data: Array2<f32>) {
        self.displays.insert(key, Display::new(data));
    }

    /// Look up a control.
    ///
    /// # Errors
    /// Returns an error if no control is registered under `key`.
    pub fn control(&self, key: &K) -> Result<&Control> {
        self.controls
            .get(key)
            .ok_or_else(|| Error::UnknownControl(format!("{key:?}")))
    }

    /// Look up a display surface.
    ///
    /// # Errors
    /// Returns an error if no display is registered under `key`.
    pub fn display(&self, key: &K) -> Result<&Display> {
        self.displays
            .get(key)
            .ok_or_else(|| Error::UnknownDisplay(format!("{key:?}")))
    }

    #[must_use]
    pub fn is_linked(&self, key: &K) -> bool {
        self.links.contains_key(key)
    }

    /// Bind `callback` to the change event of control `key`.
    ///
    /// The control's `-`/`+` buttons use the built-in clamp-and-set
    /// handlers. Linking the same control again replaces the previous
    /// callback.
    ///
    /// # Errors
    /// Returns an error if no control is registered under `key`.
    pub fn link<F>(&mut self, key: K, callback: F) -> Result<()>
    where
        F: FnMut(usize, &mut Dispatch<'_, K>) -> Result<()> + 'static,
    {
        if !self.controls.contains_key(&key) {
            return Err(Error::UnknownControl(format!("{key:?}")));
        }
        if self.links.insert(key.clone(), Box::new(callback)).is_some() {
            log::warn!("control {key:?} linked twice, previous callback replaced");
        }
        Ok(())
    }

    /// Move the slider of control `key` and dispatch the change.
    ///
    /// # Errors
    /// Returns an error if the control is unknown or a callback fails.
    pub fn set_slider(&mut self, key: &K, position: usize) -> Result<()> {
        let control = self
            .controls
            .get_mut(key)
            .ok_or_else(|| Error::UnknownControl(format!("{key:?}")))?;
        let position = control.set_slider(position);
        self.queue.push_back((key.clone(), position));
        self.drain()
    }

    /// Press one of the buttons of control `key` and dispatch the change,
    /// if any.
    ///
    /// # Errors
    /// Returns an error if the control is unknown or a callback fails.
    pub fn press(&mut self, key: &K, button: Button) -> Result<()> {
        let control = self
            .controls
            .get_mut(key)
            .ok_or_else(|| Error::UnknownControl(format!("{key:?}")))?;
        if let Some(position) = control.press(button) {
            self.queue.push_back((key.clone(), position));
        }
        self.drain()
    }

    /// Replace a display's buffer and request a redraw.
    ///
    /// # Errors
    /// Returns an error if the display is unknown or `data` has a different
    /// shape.
    pub fn update(&mut self, display: &K, data: Array2<f32>) -> Result<()> {
        replace_display(&mut self.displays, display, data)
    }

    fn drain(&mut self) -> Result<()> {
        while let Some((key, position)) = self.queue.pop_front() {
            let Some(control) = self.controls.get_mut(&key) else {
                self.discard_queue();
                return Err(Error::UnknownControl(format!("{key:?}")));
            };
            let value = control.update(position, |value| {
                log::debug!("control {key:?} -> {value}");
                value
            });

            let Some(callback) = self.links.get_mut(&key) else {
                continue;
            };
            let mut dispatch = Dispatch {
                controls: &mut self.controls,
                displays: &mut self.displays,
                queue: &mut self.queue,
            };
            if let Err(e) = callback(value, &mut dispatch) {
                self.discard_queue();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Drop pending events, putting their sliders back on the committed
    /// values.
    fn discard_queue(&mut self) {
        for (key, _) in self.queue.drain(..) {
            if let Some(control) = self.controls.get_mut(&key) {
                control.reset_slider();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager() -> ControlManager<&'static str> {
        let mut manager = ControlManager::new();
        manager.add_control("a", Control::new("A", 2, 5));
        manager.add_control("b", Control::new("B", 0, 3));
        manager.add_display("a", Array2::zeros((2, 2)));
        manager
    }

    #[test]
    fn test_link_commits_then_calls() {
        let mut manager = manager();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        manager
            .link("a", move |value, dispatch| {
                // value is already committed when the callback runs
                assert_eq!(dispatch.value(&"a")?, value);
                log.borrow_mut().push(value);
                Ok(())
            })
            .unwrap();

        manager.set_slider(&"a", 4).unwrap();
        manager.press(&"a", Button::Decrement).unwrap();
        manager.set_slider(&"a", 99).unwrap();
        assert_eq!(*seen.borrow(), vec![4, 3, 4]);
        assert_eq!(manager.control(&"a").unwrap().value(), 4);
    }

    #[test]
    fn test_buttons_at_bounds_do_not_fire() {
        let mut manager = manager();
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        manager
            .link("b", move |_, _| {
                *counter.borrow_mut() += 1;
                Ok(())
            })
            .unwrap();

        manager.press(&"b", Button::Decrement).unwrap();
        assert_eq!(*count.borrow(), 0);
        manager.press(&"b", Button::Increment).unwrap();
        manager.press(&"b", Button::Increment).unwrap();
        manager.press(&"b", Button::Increment).unwrap();
        assert_eq!(*count.borrow(), 2);
        assert_eq!(manager.control(&"b").unwrap().value(), 2);
    }

    #[test]
    fn test_unlinked_control_still_commits() {
        let mut manager = manager();
        manager.press(&"b", Button::Increment).unwrap();
        assert_eq!(manager.control(&"b").unwrap().value(), 1);
    }

    #[test]
    fn test_relink_last_wins() {
        let mut manager = manager();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&hits);
        let second = Rc::clone(&hits);
        manager
            .link("a", move |_, _| {
                first.borrow_mut().push("first");
                Ok(())
            })
            .unwrap();
        manager
            .link("a", move |_, _| {
                second.borrow_mut().push("second");
                Ok(())
            })
            .unwrap();
        manager.set_slider(&"a", 1).unwrap();
        assert_eq!(*hits.borrow(), vec!["second"]);
    }

    #[test]
    fn test_fan_out_runs_after_current_callback() {
        let mut manager = manager();
        let order = Rc::new(RefCell::new(Vec::new()));
        let from_a = Rc::clone(&order);
        let from_b = Rc::clone(&order);
        manager
            .link("a", move |value, dispatch| {
                dispatch.set_slider(&"b", value)?;
                from_a.borrow_mut().push(format!("a{value}"));
                Ok(())
            })
            .unwrap();
        manager
            .link("b", move |value, _| {
                from_b.borrow_mut().push(format!("b{value}"));
                Ok(())
            })
            .unwrap();

        manager.set_slider(&"a", 4).unwrap();
        // b clamps to its own range
        assert_eq!(*order.borrow(), vec!["a4".to_string(), "b2".to_string()]);
    }

    #[test]
    fn test_update_display() {
        let mut manager = manager();
        manager.update(&"a", Array2::ones((2, 2))).unwrap();
        let display = manager.display(&"a").unwrap();
        assert_eq!(display.revision(), 1);
        assert!(display.data().iter().all(|&v| (v - 1.0).abs() < f32::EPSILON));

        let err = manager.update(&"a", Array2::ones((3, 2))).unwrap_err();
        assert!(matches!(err, Error::DisplayShapeMismatch { .. }));
        assert_eq!(manager.display(&"a").unwrap().revision(), 1);

        assert!(matches!(
            manager.update(&"b", Array2::ones((2, 2))),
            Err(Error::UnknownDisplay(_))
        ));
    }

    #[test]
    fn test_unknown_control() {
        let mut manager = manager();
        assert!(matches!(
            manager.link("zz", |_, _| Ok(())),
            Err(Error::UnknownControl(_))
        ));
        assert!(manager.set_slider(&"zz", 0).is_err());
        assert!(manager.press(&"zz", Button::Increment).is_err());
    }

    #[test]
    fn test_callback_error_discards_queue() {
        let mut manager = manager();
        manager
            .link("a", |_, dispatch| {
                dispatch.set_slider(&"b", 1)?;
                dispatch.update(&"missing", Array2::zeros((1, 1)))
            })
            .unwrap();
        let ran = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&ran);
        manager
            .link("b", move |_, _| {
                *flag.borrow_mut() = true;
                Ok(())
            })
            .unwrap();

        assert!(manager.set_slider(&"a", 0).is_err());
        assert!(!*ran.borrow());
    }

    #[test]
    fn test_discarded_slider_returns_to_value() {
        let mut manager = manager();
        manager
            .link("a", |_, dispatch| {
                dispatch.set_slider(&"b", 3)?;
                dispatch.update(&"missing", Array2::zeros((1, 1)))
            })
            .unwrap();

        assert!(manager.set_slider(&"a", 1).is_err());
        let b = manager.control(&"b").unwrap();
        assert_eq!(b.value(), 0);
        assert_eq!(b.slider().position(), 0);

        // stepping continues from the committed value
        manager.press(&"b", Button::Increment).unwrap();
        let b = manager.control(&"b").unwrap();
        assert_eq!(b.value(), 1);
        assert_eq!(b.slider().position(), 1);
    }
}
