//! Source text generated from the host-side layout.
//!
//! Every declaration here comes from a block's field table or the vertex
//! attribute constants, so shader and host cannot drift apart silently.

use std::fmt::Write;

use backdrop_layout::{
    POSITION_LOCATION, TEX_COORDS_LOCATION, UNIFORM_BINDING, UNIFORM_GROUP, UNIFORMS_INSTANCE,
    UniformBlock, resolve_aliases,
};

/// Entry point name of the vertex stage.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Entry point name of the fragment stage.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// GLSL uniform block bound to the `uniforms` instance.
pub fn glsl_uniform_block<B: UniformBlock>() -> String {
    let mut out = format!(
        "layout(set = {UNIFORM_GROUP}, binding = {UNIFORM_BINDING}) uniform {} {{\n",
        B::BLOCK_NAME
    );
    for field in B::FIELDS {
        let _ = writeln!(
            out,
            "    {}; // offset {}, size {}",
            field.kind.glsl_decl(field.name),
            field.offset,
            field.kind.size()
        );
    }
    let _ = writeln!(out, "}} {UNIFORMS_INSTANCE};");
    out
}

/// One `#define` per alias that block `B` can resolve.
pub fn glsl_alias_defines<B: UniformBlock>() -> String {
    resolve_aliases::<B>().fold(String::new(), |mut out, alias| {
        let _ = writeln!(out, "#define {} {}", alias.name, alias.expansion());
        out
    })
}

/// WGSL struct and binding for block `B`.
pub fn wgsl_uniform_block<B: UniformBlock>() -> String {
    let mut out = format!("struct {} {{\n", B::BLOCK_NAME);
    for field in B::FIELDS {
        let _ = writeln!(
            out,
            "    {}: {}, // offset {}",
            field.name,
            field.kind.wgsl_type(),
            field.offset
        );
    }
    let _ = write!(
        out,
        "}}\n\n@group({UNIFORM_GROUP}) @binding({UNIFORM_BINDING})\nvar<uniform> {UNIFORMS_INSTANCE}: {};\n",
        B::BLOCK_NAME
    );
    out
}

/// Vertex stage shared by all shaders: `Vertex2D` in, `ProjectedVertex` out.
pub fn wgsl_vertex_stage() -> String {
    format!(
        r#"struct Vertex2D {{
    @location({POSITION_LOCATION}) position: vec2<f32>,
    @location({TEX_COORDS_LOCATION}) texCoords: vec2<f32>,
}}

struct ProjectedVertex {{
    @builtin(position) position: vec4<f32>,
    @location(0) texCoords: vec2<f32>,
}}

@vertex
fn {VERTEX_ENTRY}(vertex_in: Vertex2D) -> ProjectedVertex {{
    var projected: ProjectedVertex;
    projected.position = vec4<f32>(vertex_in.position, 0.0, 1.0);
    projected.texCoords = vertex_in.texCoords;
    return projected;
}}
"#
    )
}
