//! Explorer wrapper exposed to JavaScript.

use anyhow::Context;
use nalgebra::Vector3;
use serde_wasm_bindgen::{from_value, to_value};
use topo_core::{Explorer, ExplorerSettings, SurfaceKind};
use wasm_bindgen::prelude::*;

pub(crate) fn build_explorer(surface: &str, settings: ExplorerSettings) -> anyhow::Result<Explorer> {
    let initial_surface = surface
        .parse::<SurfaceKind>()
        .context("Failed to select initial surface")?;
    Explorer::new(ExplorerSettings {
        initial_surface,
        ..settings
    })
    .context("Failed to create explorer")
}

pub(crate) fn flatten_vectors(vectors: &[Vector3<f64>]) -> Vec<f64> {
    vectors.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
}

fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

#[wasm_bindgen]
pub struct WasmExplorer {
    explorer: Explorer,
}

#[wasm_bindgen]
impl WasmExplorer {
    /// `settings` may be `undefined`/`null` for defaults, or a partial object.
    #[wasm_bindgen(constructor)]
    pub fn new(surface: &str, settings: JsValue) -> Result<WasmExplorer, JsValue> {
        console_error_panic_hook::set_once();

        let settings: ExplorerSettings = if settings.is_undefined() || settings.is_null() {
            ExplorerSettings::default()
        } else {
            from_value(settings)
                .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?
        };
        let explorer = build_explorer(surface, settings).map_err(to_js_error)?;
        Ok(WasmExplorer { explorer })
    }

    pub fn select_surface(&mut self, name: &str) -> Result<(), JsValue> {
        self.explorer
            .select_surface_by_name(name)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn move_by(&mut self, du: f64, dv: f64) {
        self.explorer.move_by(du, dv);
    }

    /// Returns whether the viewpoint moved.
    pub fn steer(&mut self, forward: f64, right: f64) -> bool {
        self.explorer.steer(forward, right).is_some()
    }

    pub fn rotate_view(&mut self, delta: f64) {
        self.explorer.rotate_view(delta);
    }

    pub fn turn(&mut self, steps: f64) {
        self.explorer.turn(steps);
    }

    pub fn view_angle(&self) -> f64 {
        self.explorer.view_angle()
    }

    pub fn is_dirty(&self) -> bool {
        self.explorer.is_dirty()
    }

    pub fn mesh_generation(&self) -> f64 {
        self.explorer.mesh_generation() as f64
    }

    pub fn mesh_positions(&mut self) -> Vec<f32> {
        self.explorer.render_mesh().positions.clone()
    }

    pub fn mesh_normals(&mut self) -> Vec<f32> {
        self.explorer.render_mesh().normals.clone()
    }

    pub fn mesh_indices(&mut self) -> Vec<u32> {
        self.explorer.render_mesh().indices.clone()
    }

    /// `[u.x, u.y, u.z, v.x, v.y, v.z]`
    pub fn world_basis_vectors(&mut self) -> Vec<f64> {
        let (u, v) = self.explorer.world_basis_vectors();
        flatten_vectors(&[u, v])
    }

    /// `[forward.x, forward.y, forward.z, right.x, right.y, right.z]`
    pub fn player_axes(&self) -> Vec<f64> {
        let (forward, right) = self.explorer.player_axes();
        flatten_vectors(&[forward, right])
    }

    pub fn landmarks_in_view(&mut self) -> Result<JsValue, JsValue> {
        let landmarks = self.explorer.landmarks_in_view();
        to_value(&landmarks).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn diagnostics(&self) -> Result<JsValue, JsValue> {
        to_value(&self.explorer.diagnostics())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn diagnostics_text(&self) -> String {
        self.explorer.diagnostics().to_string()
    }
}
