/// The import library, glam and the target engine disagree on matrix layout and winding order.
/// This module converts between them.
pub mod coordinate_systems;
/// Non-fatal problems found while importing.
pub mod diagnostics;
pub mod mesh_utils;
/// basic types (e.g. mesh) to abstract away from both the native layout and the render backend.
pub mod types;
