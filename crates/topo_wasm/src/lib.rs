//! WASM bindings for the surface explorer.
//!
//! The browser front end owns the window, input polling and draw calls; it
//! pushes movement and surface selection in and pulls mesh buffers out once
//! per frame.

use topo_core::SurfaceKind;
use wasm_bindgen::prelude::*;

mod explorer;

pub use explorer::WasmExplorer;

/// Identifiers accepted by `WasmExplorer::select_surface`.
#[wasm_bindgen]
pub fn surface_kinds() -> js_sys::Array {
    SurfaceKind::ALL
        .iter()
        .map(|kind| JsValue::from_str(kind.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::surface_kinds;
    use topo_core::SurfaceKind;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[test]
    fn surface_kinds_follow_registry_order() {
        let names: Vec<&str> = SurfaceKind::ALL.iter().map(|kind| kind.as_str()).collect();
        assert_eq!(names, ["torus", "moebius", "moebius2", "klein", "projective"]);
        for name in names {
            assert_eq!(name.parse::<SurfaceKind>().map(|kind| kind.as_str()), Ok(name));
        }
    }

    #[wasm_bindgen_test]
    fn surface_kinds_lists_every_surface() {
        let kinds = surface_kinds();
        assert_eq!(kinds.length(), 5);
        assert_eq!(kinds.get(2).as_string().as_deref(), Some("moebius2"));
    }
}
