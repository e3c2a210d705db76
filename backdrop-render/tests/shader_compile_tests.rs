//! Integration tests for shader compilation against the uniform layouts.
//!
//! These run entirely through naga; no GPU is required.

use backdrop_layout::{FrameInputs, LayoutError, TouchUniforms, UniformBlock, Uniforms};
use backdrop_render::shader::uniform_layout;
use backdrop_render::{RenderError, ShaderLanguage, compile_shader, compile_shader_file};
use std::fs;
use tempfile::TempDir;

const PLASMA_GLSL: &str = r#"
void mainImage(out vec4 fragColor, in vec2 fragCoord) {
    vec2 uv = fragCoord / iResolution.xy;
    float wave = sin(uv.x * 10.0 + iGlobalTime) * 0.5 + 0.5;
    float pulse = fract(iTimeDelta * 60.0 + float(iFrame) * 0.01);
    fragColor = vec4(uv, wave * pulse, 1.0);
}
"#;

const PLASMA_WGSL: &str = r#"
fn mainImage(fragCoord: vec2<f32>) -> vec4<f32> {
    let uv = fragCoord / iResolution;
    let wave = sin(uv.x * 10.0 + iGlobalTime) * 0.5 + 0.5;
    return vec4<f32>(uv, wave * f32(iFrame % 2), 1.0);
}
"#;

const TOUCH_GLSL: &str = r#"
void mainImage(out vec4 fragColor, in vec2 fragCoord) {
    float glow = 0.0;
    for (int i = 0; i < iTouchCount; i++) {
        glow += 10.0 / max(distance(fragCoord, iTouches[i].xy), 1.0);
    }
    fragColor = vec4(vec3(glow), 1.0);
}
"#;

const TOUCHES_ONLY_GLSL: &str = r#"
void mainImage(out vec4 fragColor, in vec2 fragCoord) {
    fragColor = vec4(iTouches[0].xy / iResolution, 0.0, 1.0);
}
"#;

fn read_f32(bytes: &[u8], offset: u32) -> f32 {
    let start = offset as usize;
    f32::from_ne_bytes(bytes[start..start + 4].try_into().expect("4 bytes"))
}

#[test]
fn test_glsl_shader_compiles_with_both_entry_points() {
    let shader = compile_shader::<Uniforms>(PLASMA_GLSL, "plasma.glsl", ShaderLanguage::Glsl)
        .expect("plasma compiles");
    assert!(shader.wgsl.contains("fn vs_main("));
    assert!(shader.wgsl.contains("fn fs_main("));
    assert!(!shader.wgsl.contains("fn main("));
    assert_eq!(shader.language, ShaderLanguage::Glsl);
}

#[test]
fn test_wgsl_shader_compiles() {
    let shader = compile_shader::<Uniforms>(PLASMA_WGSL, "plasma.wgsl", ShaderLanguage::Wgsl)
        .expect("plasma compiles");
    assert!(shader.wgsl.contains("(uniforms.resolution)"));
    assert!(shader.wgsl.contains("fn fs_main(projected: ProjectedVertex)"));
}

#[test]
fn test_compiled_offsets_match_host_fields() {
    for (source, language) in [
        (PLASMA_GLSL, ShaderLanguage::Glsl),
        (PLASMA_WGSL, ShaderLanguage::Wgsl),
    ] {
        let shader = compile_shader::<Uniforms>(source, "plasma", language).expect("compiles");
        for field in Uniforms::FIELDS {
            assert_eq!(
                shader.uniform_layout.offset_of(field.name),
                Some(field.offset),
                "{:?} {}",
                language,
                field.name
            );
        }
        assert!(shader.uniform_layout.span as usize <= std::mem::size_of::<Uniforms>());
    }
}

#[test]
fn test_shader_observes_host_values() {
    let shader = compile_shader::<Uniforms>(PLASMA_GLSL, "plasma.glsl", ShaderLanguage::Glsl)
        .expect("plasma compiles");

    // Re-derive offsets from the emitted WGSL, as the GPU driver would see it
    let module = naga::front::wgsl::parse_str(&shader.wgsl).expect("emitted WGSL parses");
    let layout = uniform_layout(&module).expect("uniform block present");

    let uniforms = Uniforms::from_frame(&FrameInputs {
        resolution: [800.0, 600.0],
        time: 12.5,
        delta_time: 0.016,
        frame_index: 750,
        touches: &[],
    });
    let bytes = uniforms.as_bytes();

    let resolution = layout.offset_of("resolution").expect("resolution");
    assert_eq!(read_f32(bytes, resolution), 800.0);
    assert_eq!(read_f32(bytes, resolution + 4), 600.0);
    assert_eq!(read_f32(bytes, layout.offset_of("time").expect("time")), 12.5);
    assert_eq!(
        read_f32(bytes, layout.offset_of("deltaTime").expect("deltaTime")),
        0.016
    );
    let frame = layout.offset_of("frameIndex").expect("frameIndex") as usize;
    assert_eq!(
        i32::from_ne_bytes(bytes[frame..frame + 4].try_into().expect("4 bytes")),
        750
    );
}

#[test]
fn test_touches_fail_against_base_block() {
    for language in [ShaderLanguage::Glsl, ShaderLanguage::Wgsl] {
        let source = match language {
            ShaderLanguage::Glsl => TOUCHES_ONLY_GLSL,
            ShaderLanguage::Wgsl => {
                "fn mainImage(p: vec2<f32>) -> vec4<f32> { return iTouches[0]; }"
            }
        };
        let err = compile_shader::<Uniforms>(source, "touch", language)
            .expect_err("Uniforms has no touches field");
        match err {
            RenderError::UnresolvedAlias { source, .. } => assert_eq!(
                source,
                LayoutError::UnresolvedAlias {
                    alias: "iTouches",
                    field: "touches",
                    block: "Uniforms",
                }
            ),
            other => panic!("unexpected error for {language:?}: {other}"),
        }
    }
}

#[test]
fn test_touch_shader_reports_first_unresolved_alias() {
    // iTouchCount appears before iTouches in the loop header
    let err = compile_shader::<Uniforms>(TOUCH_GLSL, "touch.glsl", ShaderLanguage::Glsl)
        .expect_err("Uniforms has no touch fields");
    match err {
        RenderError::UnresolvedAlias { name, source } => {
            assert_eq!(name, "touch.glsl");
            assert_eq!(
                source,
                LayoutError::UnresolvedAlias {
                    alias: "iTouchCount",
                    field: "touchCount",
                    block: "Uniforms",
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_touches_compile_against_touch_block() {
    let shader = compile_shader::<TouchUniforms>(TOUCH_GLSL, "touch.glsl", ShaderLanguage::Glsl)
        .expect("touch block declares touches");
    assert_eq!(shader.uniform_layout.offset_of("touches"), Some(32));
    assert_eq!(shader.uniform_layout.offset_of("touchCount"), Some(20));

    let shader = compile_shader::<TouchUniforms>(
        "fn mainImage(p: vec2<f32>) -> vec4<f32> { return vec4<f32>(iTouches[0].xy / iResolution, 0.0, 1.0); }",
        "touch.wgsl",
        ShaderLanguage::Wgsl,
    )
    .expect("touch block declares touches");
    assert_eq!(shader.uniform_layout.offset_of("touches"), Some(32));
}

#[test]
fn test_glsl_syntax_error_is_reported() {
    let err = compile_shader::<Uniforms>(
        "void mainImage(out vec4 fragColor, in vec2 fragCoord) { fragColor = ; }",
        "broken.glsl",
        ShaderLanguage::Glsl,
    )
    .expect_err("syntax error");
    assert!(matches!(err, RenderError::GlslParse { ref name, .. } if name == "broken.glsl"));
}

#[test]
fn test_wgsl_type_error_is_reported() {
    let err = compile_shader::<Uniforms>(
        "fn mainImage(p: vec2<f32>) -> vec4<f32> { return iGlobalTime; }",
        "mistyped.wgsl",
        ShaderLanguage::Wgsl,
    )
    .expect_err("returns f32 where vec4 is expected");
    assert!(matches!(
        err,
        RenderError::WgslParse { .. } | RenderError::ShaderValidation { .. }
    ));
}

#[test]
fn test_compile_shader_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let glsl_path = temp_dir.path().join("plasma.glsl");
    fs::write(&glsl_path, PLASMA_GLSL).expect("Failed to write shader");
    let shader = compile_shader_file::<Uniforms>(&glsl_path).expect("file compiles");
    assert_eq!(shader.language, ShaderLanguage::Glsl);
    assert!(shader.name.ends_with("plasma.glsl"));

    let wgsl_path = temp_dir.path().join("plasma.wgsl");
    fs::write(&wgsl_path, PLASMA_WGSL).expect("Failed to write shader");
    assert_eq!(
        compile_shader_file::<Uniforms>(&wgsl_path)
            .expect("file compiles")
            .language,
        ShaderLanguage::Wgsl
    );
}

#[test]
fn test_compile_shader_file_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let missing = temp_dir.path().join("missing.glsl");
    assert!(matches!(
        compile_shader_file::<Uniforms>(&missing),
        Err(RenderError::ShaderFileRead { .. })
    ));

    let unknown = temp_dir.path().join("shader.hlsl");
    fs::write(&unknown, "float4 main() : SV_Target { return 0; }").expect("write");
    assert!(matches!(
        compile_shader_file::<Uniforms>(&unknown),
        Err(RenderError::UnsupportedLanguage(_))
    ));
}

#[test]
fn test_language_detection() {
    use std::path::Path;
    assert_eq!(
        ShaderLanguage::from_path(Path::new("a/b/crt.GLSL")),
        Some(ShaderLanguage::Glsl)
    );
    assert_eq!(
        ShaderLanguage::from_path(Path::new("x.frag")),
        Some(ShaderLanguage::Glsl)
    );
    assert_eq!(
        ShaderLanguage::from_path(Path::new("x.wgsl")),
        Some(ShaderLanguage::Wgsl)
    );
    assert_eq!(ShaderLanguage::from_path(Path::new("x")), None);
}

#[test]
fn test_bundled_shaders_compile() {
    let plasma = include_str!("../../shaders/plasma.glsl");
    compile_shader::<Uniforms>(plasma, "plasma.glsl", ShaderLanguage::Glsl)
        .expect("plasma compiles");

    let waves = include_str!("../../shaders/waves.wgsl");
    compile_shader::<Uniforms>(waves, "waves.wgsl", ShaderLanguage::Wgsl).expect("waves compiles");

    let ripples = include_str!("../../shaders/ripples.glsl");
    compile_shader::<TouchUniforms>(ripples, "ripples.glsl", ShaderLanguage::Glsl)
        .expect("ripples compiles against the touch block");
    assert!(compile_shader::<Uniforms>(ripples, "ripples.glsl", ShaderLanguage::Glsl).is_err());
}
