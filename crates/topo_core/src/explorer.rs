//! Single-viewpoint exploration state and the per-frame pull API.
//!
//! Every mutation marks the cached mesh dirty; the mesh, its frame and the
//! world basis are rebuilt lazily by the next query that needs them.

use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::embedding::{default_world_basis, landmarks_in_view, render_local_mesh, LocalFrame};
use crate::error::TopologyError;
use crate::player::{Crossings, MoveOutcome, PlayerState};
use crate::settings::ExplorerSettings;
use crate::surfaces::{Surface, SurfaceKind};
use crate::types::{LocalMesh, Orientation, Resolved, Uv, VisibleLandmark};

const PLAYER_AXIS_LENGTH: f64 = 0.2;

/// Read-only snapshot for on-screen display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub surface: SurfaceKind,
    pub position: Uv,
    pub crossings: Crossings,
    pub orientation: Orientation,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orientation = match self.orientation {
            Orientation::Direct => "normal (+)",
            Orientation::Reversed => "reversed (-)",
        };
        write!(
            f,
            "UV: ({:.3}, {:.3}) | Turns: U={}, V={} | Orientation: {}",
            self.position.x, self.position.y, self.crossings.u, self.crossings.v, orientation
        )
    }
}

#[derive(Debug, Clone)]
struct MeshCache {
    mesh: LocalMesh,
    frame: Option<Resolved<LocalFrame>>,
    world_basis: (Vector3<f64>, Vector3<f64>),
    dirty: bool,
    generation: u64,
}

impl MeshCache {
    fn new(axis_length: f64) -> Self {
        Self {
            mesh: LocalMesh::default(),
            frame: None,
            world_basis: default_world_basis(axis_length),
            dirty: true,
            generation: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Explorer {
    settings: ExplorerSettings,
    surface: Surface,
    player: PlayerState,
    view_angle: f64,
    cache: MeshCache,
}

impl Explorer {
    /// Build an explorer on `settings.initial_surface`, starting at the
    /// center of its parameter domain.
    pub fn new(settings: ExplorerSettings) -> Result<Self, TopologyError> {
        settings.validate()?;
        let surface = Surface::new(settings.initial_surface);
        let player = PlayerState::new(surface.grid().center());
        Ok(Self {
            settings,
            surface,
            player,
            view_angle: 0.0,
            cache: MeshCache::new(settings.axis_length),
        })
    }

    pub fn settings(&self) -> &ExplorerSettings {
        &self.settings
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn view_angle(&self) -> f64 {
        self.view_angle
    }

    pub fn is_dirty(&self) -> bool {
        self.cache.dirty
    }

    /// Number of mesh rebuilds so far. Unchanged means the buffers are too.
    pub fn mesh_generation(&self) -> u64 {
        self.cache.generation
    }

    /// Switch surfaces and reset the viewpoint to the surface's start position.
    pub fn select_surface(&mut self, kind: SurfaceKind) {
        self.surface = Surface::new(kind);
        self.player = PlayerState::new(kind.start_position());
        self.cache.dirty = true;
        tracing::info!(
            surface = kind.as_str(),
            triangles = self.surface.triangles().len(),
            "selected surface"
        );
    }

    /// Parse `name` and select it. Unknown names are rejected.
    pub fn select_surface_by_name(&mut self, name: &str) -> Result<(), TopologyError> {
        let kind = name.parse::<SurfaceKind>()?;
        self.select_surface(kind);
        Ok(())
    }

    /// Move in UV. A non-finite delta is dropped and leaves the cache intact.
    pub fn move_by(&mut self, du: f64, dv: f64) -> MoveOutcome {
        let outcome = self.player.apply_move(&self.surface, Uv::new(du, dv));
        if du.is_finite() && dv.is_finite() {
            self.cache.dirty = true;
        }
        outcome
    }

    /// Move relative to the view heading; `forward`/`right` are unit intents.
    ///
    /// Returns `None` and leaves the cache untouched when there is no intent.
    pub fn steer(&mut self, forward: f64, right: f64) -> Option<MoveOutcome> {
        if forward == 0.0 && right == 0.0 {
            return None;
        }
        let (sin, cos) = self.view_angle.sin_cos();
        let speed = self.settings.move_speed;
        let du = (right * cos - forward * sin) * speed;
        let dv = (right * sin + forward * cos) * speed;
        Some(self.move_by(du, dv))
    }

    /// Rotate the view heading. Geometry does not depend on it.
    pub fn rotate_view(&mut self, delta: f64) {
        self.view_angle += delta;
    }

    /// Rotate by `steps` multiples of the configured turn rate.
    pub fn turn(&mut self, steps: f64) {
        self.rotate_view(steps * self.settings.turn_rate);
    }

    /// Camera-relative forward and right arrows in the local frame.
    pub fn player_axes(&self) -> (Vector3<f64>, Vector3<f64>) {
        let (sin, cos) = self.view_angle.sin_cos();
        (
            Vector3::new(-sin, cos, 0.0) * PLAYER_AXIS_LENGTH,
            Vector3::new(cos, sin, 0.0) * PLAYER_AXIS_LENGTH,
        )
    }

    /// Local mesh around the viewpoint, rebuilt only if state changed.
    pub fn render_mesh(&mut self) -> &LocalMesh {
        self.refresh();
        &self.cache.mesh
    }

    /// World U/V arrows computed at the last rebuild.
    pub fn world_basis_vectors(&mut self) -> (Vector3<f64>, Vector3<f64>) {
        self.refresh();
        self.cache.world_basis
    }

    pub fn landmarks_in_view(&mut self) -> Vec<VisibleLandmark> {
        self.refresh();
        let frame = self.current_frame();
        landmarks_in_view(
            &self.surface,
            &frame,
            &self.player.position,
            self.settings.view_radius,
        )
    }

    /// Embed an arbitrary UV point with the cached frame.
    pub fn project_point(&mut self, point: &Uv) -> Resolved<Vector3<f64>> {
        self.refresh();
        let frame = self.current_frame();
        let unwrapped = self
            .surface
            .seams()
            .adjust_for_wrapping(point, &self.player.position);
        frame.project_point(&unwrapped)
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            surface: self.surface.kind(),
            position: self.player.position,
            crossings: self.player.crossings,
            orientation: self.player.orientation,
        }
    }

    /// True when the last rebuild had to use a fallback frame.
    pub fn frame_is_fallback(&mut self) -> bool {
        self.refresh();
        self.cache.frame.is_some_and(|frame| frame.is_fallback())
    }

    fn current_frame(&self) -> LocalFrame {
        self.cache
            .frame
            .map(Resolved::into_inner)
            .unwrap_or_else(|| LocalFrame::flat(self.player.position))
    }

    fn refresh(&mut self) {
        if !self.cache.dirty {
            return;
        }
        let center = self.player.position;
        let orientation = self.player.orientation;
        let (mesh, frame) = render_local_mesh(
            &self.surface,
            &center,
            self.settings.view_radius,
            orientation,
        );
        self.cache.world_basis = frame
            .value()
            .world_basis_vectors(orientation, self.settings.axis_length)
            .into_inner();
        self.cache.mesh = mesh;
        self.cache.frame = Some(frame);
        self.cache.dirty = false;
        self.cache.generation += 1;

        tracing::debug!(
            surface = self.surface.kind().as_str(),
            u = center.x,
            v = center.y,
            orientation = orientation.sign(),
            triangles = self.cache.mesh.triangle_count(),
            generation = self.cache.generation,
            "rebuilt local mesh"
        );
    }
}
