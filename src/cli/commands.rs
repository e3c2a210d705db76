//! Offline subcommands: `check`, `wgsl` and `layout`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use backdrop_config::{Config, parse_shader_metadata_from_file, resolve_shader_settings};
use backdrop_layout::{SHADERTOY_ALIASES, TouchUniforms, UniformBlock, Uniforms};
use backdrop_render::{CompiledShader, compile_shader_file};

/// Load the config from an explicit path, the default path, or fall back to
/// defaults when no file exists. Never writes a file.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => {
            let default_path = Config::config_path();
            if default_path.exists() {
                Config::load_from(&default_path)
            } else {
                log::debug!("No config at {:?}, using defaults", default_path);
                Ok(Config::default())
            }
        }
    }
}

/// Whether a shader should be compiled against the touch-enabled block.
///
/// The `--touches` flag forces it on; otherwise config and shader metadata
/// decide.
pub fn wants_touches(path: &Path, flag: bool, config: &Config) -> bool {
    if flag {
        return true;
    }
    let metadata = parse_shader_metadata_from_file(path);
    resolve_shader_settings(metadata.as_ref(), config).touches
}

/// Compile a shader file against the block selected by `touches`.
pub fn compile_for(path: &Path, touches: bool) -> Result<CompiledShader> {
    let shader = if touches {
        compile_shader_file::<TouchUniforms>(path)
    } else {
        compile_shader_file::<Uniforms>(path)
    };
    shader.with_context(|| format!("Failed to compile shader {}", path.display()))
}

fn block_name(touches: bool) -> &'static str {
    if touches {
        TouchUniforms::BLOCK_NAME
    } else {
        Uniforms::BLOCK_NAME
    }
}

/// Compile and validate a shader, printing the uniform layout naga assigned.
pub fn check_cli(path: &Path, touches: bool, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let touches = wants_touches(path, touches, &config);
    let shader = compile_for(path, touches)?;

    println!(
        "{}: ok ({}, {} block, {} bytes of WGSL)",
        shader.name,
        shader.language.name(),
        block_name(touches),
        shader.wgsl.len()
    );
    for (member, offset) in &shader.uniform_layout.members {
        println!("  {offset:>4}  {member}");
    }
    println!("  span {} bytes", shader.uniform_layout.span);
    Ok(())
}

/// Print or write the generated WGSL for a shader.
pub fn wgsl_cli(
    path: &Path,
    touches: bool,
    config: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let touches = wants_touches(path, touches, &config);
    let shader = compile_for(path, touches)?;

    match output {
        Some(output) => {
            std::fs::write(output, &shader.wgsl)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            log::info!("Wrote WGSL for {} to {}", shader.name, output.display());
        }
        None => print!("{}", shader.wgsl),
    }
    Ok(())
}

/// Print the layout of the selected uniform block.
pub fn layout_cli(touches: bool) {
    let report = if touches {
        layout_report::<TouchUniforms>()
    } else {
        layout_report::<Uniforms>()
    };
    print!("{report}");
}

/// Human-readable table of a block's fields and the aliases it resolves.
pub fn layout_report<B: UniformBlock>() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} bytes, std140)",
        B::BLOCK_NAME,
        std::mem::size_of::<B>()
    );
    for field in B::FIELDS {
        let _ = writeln!(
            out,
            "  {:>4}  {:<12} {}",
            field.offset,
            field.name,
            field.kind.wgsl_type()
        );
    }
    out.push_str("aliases:\n");
    for alias in SHADERTOY_ALIASES {
        let status = if alias.resolves_in::<B>() {
            alias.expansion()
        } else {
            "(unresolved)".to_string()
        };
        let _ = writeln!(out, "  {:<12} {}", alias.name, status);
    }
    out
}
