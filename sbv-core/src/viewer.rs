//! Three-plane viewer wiring.
//!
//! [`Viewer`] creates one control per spatial axis plus a frame control,
//! renders the middle slice of each plane at frame 0 and links the controls:
//!
//! - a spatial control redraws its own plane at the current frame;
//! - the frame control re-sets each spatial slider to its current value,
//!   so all three planes redraw at the new frame.

use std::fmt;
use std::sync::Arc;

use crate::control::{Button, Control};
use crate::error::Result;
use crate::manager::{ControlManager, Display};
use crate::volume::{IntensityRange, Plane, Volume};

/// Names of the viewer's controls and displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Sagittal,
    Coronal,
    Transverse,
    /// Time axis; has a control but no display.
    Frame,
}

impl ViewId {
    /// All controls in layout order.
    pub const ALL: [ViewId; 4] = [
        ViewId::Sagittal,
        ViewId::Coronal,
        ViewId::Transverse,
        ViewId::Frame,
    ];

    /// Plane shown by this view, `None` for the frame control.
    #[must_use]
    pub fn plane(self) -> Option<Plane> {
        match self {
            ViewId::Sagittal => Some(Plane::Sagittal),
            ViewId::Coronal => Some(Plane::Coronal),
            ViewId::Transverse => Some(Plane::Transverse),
            ViewId::Frame => None,
        }
    }
}

impl From<Plane> for ViewId {
    fn from(plane: Plane) -> Self {
        match plane {
            Plane::Sagittal => ViewId::Sagittal,
            Plane::Coronal => ViewId::Coronal,
            Plane::Transverse => ViewId::Transverse,
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.plane() {
            Some(plane) => write!(f, "{plane}"),
            None => write!(f, "frame"),
        }
    }
}

/// A voxel under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    /// `[x, y, z, t]`
    pub voxel: [usize; 4],
    pub value: f32,
}

/// Interactive three-plane view of one volume.
pub struct Viewer {
    volume: Arc<Volume>,
    manager: ControlManager<ViewId>,
}

impl Viewer {
    /// Build the controls, render the initial slices and link everything.
    ///
    /// # Errors
    /// Returns an error if an initial slice cannot be extracted.
    pub fn new(volume: Volume) -> Result<Self> {
        Self::from_shared(Arc::new(volume))
    }

    /// Same as [`Viewer::new`] for a volume that is already shared.
    ///
    /// # Errors
    /// Returns an error if an initial slice cannot be extracted.
    pub fn from_shared(volume: Arc<Volume>) -> Result<Self> {
        let mid = volume.midpoint();
        let mut manager = ControlManager::new();

        for plane in Plane::ALL {
            let index = mid[plane.axis()];
            let id = ViewId::from(plane);
            manager.add_control(
                id,
                Control::new(plane.label(), index, volume.dim(plane.axis())),
            );
            manager.add_display(id, volume.slice(plane, index, 0)?);
        }
        manager.add_control(ViewId::Frame, Control::new("Frame", 0, volume.n_frames()));

        for plane in Plane::ALL {
            let id = ViewId::from(plane);
            let volume = Arc::clone(&volume);
            manager.link(id, move |index, dispatch| {
                let frame = dispatch.value(&ViewId::Frame)?;
                let data = volume.slice(plane, index, frame)?;
                dispatch.update(&id, data)
            })?;
        }
        manager.link(ViewId::Frame, |_, dispatch| {
            for plane in Plane::ALL {
                let id = ViewId::from(plane);
                let current = dispatch.value(&id)?;
                dispatch.set_slider(&id, current)?;
            }
            Ok(())
        })?;

        let range = volume.intensity_range();
        log::info!(
            "viewer ready: shape {:?}, start {:?}, intensity {}..{}",
            volume.shape(),
            mid,
            range.min,
            range.max
        );
        Ok(Self { volume, manager })
    }

    #[must_use]
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Display scaling shared by all planes.
    #[must_use]
    pub fn intensity_range(&self) -> IntensityRange {
        self.volume.intensity_range()
    }

    /// # Errors
    /// Never fails for the ids in [`ViewId::ALL`].
    pub fn control(&self, id: ViewId) -> Result<&Control> {
        self.manager.control(&id)
    }

    /// # Errors
    /// Never fails for a [`Plane`].
    pub fn display(&self, plane: Plane) -> Result<&Display> {
        self.manager.display(&ViewId::from(plane))
    }

    /// Committed frame index.
    #[must_use]
    pub fn frame(&self) -> usize {
        self.manager
            .control(&ViewId::Frame)
            .map_or(0, Control::value)
    }

    /// Drag the slider of `id` to `position`.
    ///
    /// # Errors
    /// Returns an error if a redraw callback fails.
    pub fn set_slider(&mut self, id: ViewId, position: usize) -> Result<()> {
        self.manager.set_slider(&id, position)
    }

    /// Click the `-` or `+` button of `id`.
    ///
    /// # Errors
    /// Returns an error if a redraw callback fails.
    pub fn press(&mut self, id: ViewId, button: Button) -> Result<()> {
        self.manager.press(&id, button)
    }

    /// Voxel shown at `(column, row)` of `plane`'s current slice.
    #[must_use]
    pub fn probe(&self, plane: Plane, column: usize, row: usize) -> Option<Probe> {
        let index = self.control(plane.into()).ok()?.value();
        let (col_axis, row_axis) = plane.in_plane_axes();
        let mut voxel = [0usize; 4];
        voxel[plane.axis()] = index;
        voxel[col_axis] = column;
        voxel[row_axis] = row;
        voxel[3] = self.frame();
        let value = self.volume.get(voxel[0], voxel[1], voxel[2], voxel[3])?;
        Some(Probe { voxel, value })
    }
}
