//=========================================================================
// Surface & Mount Point
//=========================================================================
//
// The render-output element and the single well-known container it is
// attached to.
//
// Convention: exactly one surface element exists per engine handle, it
// always carries the fixed element id, and at most one surface is mounted
// at any time. The lifecycle loader is the only intended mutator of the
// mount point.
//
//=========================================================================

//=== External Crates =====================================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::RenderConfig;
use std::rc::Rc;

//=== Surface =============================================================

/// Fixed id carried by every surface element.
pub const SURFACE_ELEMENT_ID: &str = "canvas";

/// Render-output element produced by a backend initialization.
///
/// The surface is shared (`Rc`) between the engine handle and the mount
/// point while attached; dropping the handle on re-init leaves a detached
/// mount entry harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    id: String,
    width: u32,
    height: u32,
}

impl Surface {
    /// Creates a surface sized per `config`, carrying the fixed id.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            id: SURFACE_ELEMENT_ID.to_owned(),
            width: config.width,
            height: config.height,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

//=== MountPoint ==========================================================

/// The single container surfaces are attached to and detached from.
pub struct MountPoint {
    slot: Option<Rc<Surface>>,
}

impl MountPoint {
    /// Creates an empty mount point.
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Attaches `surface`, replacing (and warning about) any occupant.
    ///
    /// Teardown always precedes load, so a replacement here indicates a
    /// lifecycle ordering bug upstream.
    pub fn attach(&mut self, surface: Rc<Surface>) {
        if let Some(previous) = &self.slot {
            warn!(target: "render", "replacing mounted surface '{}'", previous.id());
        }
        self.slot = Some(surface);
    }

    /// Removes the mounted surface if present. Idempotent.
    ///
    /// Returns true when something was actually detached.
    pub fn detach(&mut self) -> bool {
        self.slot.take().is_some()
    }

    /// The currently mounted surface, if any.
    pub fn mounted(&self) -> Option<&Rc<Surface>> {
        self.slot.as_ref()
    }

    /// Returns true while a surface is mounted.
    pub fn is_mounted(&self) -> bool {
        self.slot.is_some()
    }
}

impl Default for MountPoint {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
