//! Render pipeline definitions.
//!
//! - `basic` builds a render pipeline from a vertex/fragment shader pair
//! - `phong` is the lit, textured pipeline every scene object is drawn with

pub mod basic;
pub mod phong;
