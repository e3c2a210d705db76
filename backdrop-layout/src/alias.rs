//! Shader-toy style names for uniform block fields.
//!
//! Shader authors write `iResolution`, `iGlobalTime`, ... and the name
//! resolves to a field of the `uniforms` variable. In GLSL the aliases become
//! `#define` lines; languages without a preprocessor (WGSL) get the same
//! result through [`expand_aliases`], which rewrites identifier tokens.
//!
//! An alias whose target field the block does not declare is an error, not a
//! silent default.

use crate::block::{UNIFORMS_INSTANCE, UniformBlock};
use crate::error::LayoutError;

/// A shader-toy name bound to a uniform block field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderAlias {
    /// Name written in shader source (e.g. `iGlobalTime`)
    pub name: &'static str,
    /// Uniform block field it stands for (e.g. `time`)
    pub field: &'static str,
}

impl ShaderAlias {
    const fn new(name: &'static str, field: &'static str) -> Self {
        Self { name, field }
    }

    /// Source text the alias stands for, e.g. `(uniforms.time)`.
    pub fn expansion(&self) -> String {
        format!("({UNIFORMS_INSTANCE}.{})", self.field)
    }

    /// Whether block `B` declares the target field.
    pub fn resolves_in<B: UniformBlock>(&self) -> bool {
        B::field(self.field).is_some()
    }
}

/// Every alias understood by the preprocessor.
pub const SHADERTOY_ALIASES: &[ShaderAlias] = &[
    ShaderAlias::new("iGlobalTime", "time"),
    ShaderAlias::new("iTime", "time"),
    ShaderAlias::new("iResolution", "resolution"),
    ShaderAlias::new("iTimeDelta", "deltaTime"),
    ShaderAlias::new("iFrame", "frameIndex"),
    ShaderAlias::new("iTouches", "touches"),
    ShaderAlias::new("iTouchCount", "touchCount"),
];

/// Look up an alias by name.
pub fn find_alias(name: &str) -> Option<&'static ShaderAlias> {
    SHADERTOY_ALIASES.iter().find(|alias| alias.name == name)
}

/// Aliases whose target field exists in block `B`.
pub fn resolve_aliases<B: UniformBlock>() -> impl Iterator<Item = &'static ShaderAlias> {
    SHADERTOY_ALIASES
        .iter()
        .filter(|alias| alias.resolves_in::<B>())
}

/// Aliases referenced in `source`, deduplicated, in order of first use.
///
/// Comments and member accesses (`foo.iTime`) are not references.
pub fn referenced_aliases(source: &str) -> Vec<&'static ShaderAlias> {
    let mut found: Vec<&'static ShaderAlias> = Vec::new();
    for segment in segments(source) {
        if let Segment::Ident(name) = segment
            && let Some(alias) = find_alias(name)
            && !found.contains(&alias)
        {
            found.push(alias);
        }
    }
    found
}

/// Fail if `source` references an alias that block `B` cannot resolve.
pub fn check_aliases<B: UniformBlock>(source: &str) -> Result<(), LayoutError> {
    match referenced_aliases(source)
        .into_iter()
        .find(|alias| !alias.resolves_in::<B>())
    {
        Some(alias) => Err(unresolved::<B>(alias)),
        None => Ok(()),
    }
}

/// Replace every alias token in `source` with its expansion.
///
/// Text inside comments is left untouched.
pub fn expand_aliases<B: UniformBlock>(source: &str) -> Result<String, LayoutError> {
    let mut out = String::with_capacity(source.len());
    for segment in segments(source) {
        match segment {
            Segment::Ident(name) => match find_alias(name) {
                Some(alias) if alias.resolves_in::<B>() => out.push_str(&alias.expansion()),
                Some(alias) => return Err(unresolved::<B>(alias)),
                None => out.push_str(name),
            },
            Segment::Other(text) => out.push_str(text),
        }
    }
    Ok(out)
}

fn unresolved<B: UniformBlock>(alias: &ShaderAlias) -> LayoutError {
    LayoutError::UnresolvedAlias {
        alias: alias.name,
        field: alias.field,
        block: B::BLOCK_NAME,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    /// A free-standing identifier
    Ident(&'a str),
    /// Anything else: punctuation, literals, comments, member names
    Other(&'a str),
}

/// Identifier byte; non-ASCII bytes count so multi-byte characters stay whole.
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Split shader source into identifiers and everything else.
fn segments(source: &str) -> Vec<Segment<'_>> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut other_start = 0;
    let mut i = 0;
    // Last significant byte outside comments was `.`
    let mut after_dot = false;

    while i < len {
        let b = bytes[i];
        if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            i = source[i..].find('\n').map_or(len, |n| i + n);
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i = source[i + 2..].find("*/").map_or(len, |n| i + 2 + n + 2);
        } else if b.is_ascii_digit() {
            // Literals like 1e5 or 2u must not yield identifiers
            while i < len && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.')
            {
                i += 1;
            }
            after_dot = false;
        } else if is_ident_byte(b) {
            let start = i;
            while i < len && is_ident_byte(bytes[i]) {
                i += 1;
            }
            // Member access, including `s . x`
            if std::mem::take(&mut after_dot) {
                continue;
            }
            if other_start < start {
                out.push(Segment::Other(&source[other_start..start]));
            }
            out.push(Segment::Ident(&source[start..i]));
            other_start = i;
        } else {
            if b == b'.' {
                after_dot = true;
            } else if !b.is_ascii_whitespace() {
                after_dot = false;
            }
            i += 1;
        }
    }

    if other_start < len {
        out.push(Segment::Other(&source[other_start..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::{TouchUniforms, Uniforms};

    #[test]
    fn test_expansions_match_field_access() {
        let expand = |name| find_alias(name).expect("known alias").expansion();
        assert_eq!(expand("iGlobalTime"), "(uniforms.time)");
        assert_eq!(expand("iResolution"), "(uniforms.resolution)");
        assert_eq!(expand("iTimeDelta"), "(uniforms.deltaTime)");
        assert_eq!(expand("iTouches"), "(uniforms.touches)");
    }

    #[test]
    fn test_touches_unresolved_in_base_block() {
        let resolved: Vec<&str> = resolve_aliases::<Uniforms>().map(|a| a.name).collect();
        assert_eq!(
            resolved,
            ["iGlobalTime", "iTime", "iResolution", "iTimeDelta", "iFrame"]
        );
        assert_eq!(resolve_aliases::<TouchUniforms>().count(), SHADERTOY_ALIASES.len());
    }

    #[test]
    fn test_expand_is_lexically_equivalent() {
        let source = "let uv = pos / iResolution; let t = iGlobalTime + iTimeDelta;";
        let expanded = expand_aliases::<Uniforms>(source).expect("all aliases resolve");
        assert_eq!(
            expanded,
            "let uv = pos / (uniforms.resolution); \
             let t = (uniforms.time) + (uniforms.deltaTime);"
        );
    }

    #[test]
    fn test_expand_skips_comments_members_and_prefixes() {
        let source = "// iTouches here is fine\n\
                      /* iTouches */ let a = s.iTime + iTimeX + 2iTime;";
        let expanded = expand_aliases::<Uniforms>(source).expect("comment is ignored");
        assert_eq!(expanded, source);
    }

    #[test]
    fn test_expand_skips_spaced_member_access() {
        let source = "let v = s . iTime;\nlet w = s.\n    iResolution;";
        assert_eq!(expand_aliases::<Uniforms>(source).as_deref(), Ok(source));

        let after_comment = "// ends with a period.\nlet t = 1.0;\niTime;";
        assert_eq!(
            expand_aliases::<Uniforms>(after_comment).as_deref(),
            Ok("// ends with a period.\nlet t = 1.0;\n(uniforms.time);")
        );
    }

    #[test]
    fn test_expand_keeps_non_ascii_identifiers_whole() {
        let source = "let héiTime = 1.0; let iTimeé = 2.0; let é = iTime;";
        assert_eq!(
            expand_aliases::<Uniforms>(source).as_deref(),
            Ok("let héiTime = 1.0; let iTimeé = 2.0; let é = (uniforms.time);")
        );
    }

    #[test]
    fn test_expand_fails_on_unresolved_alias() {
        let source = "let t = iTouches[0];";
        assert_eq!(
            expand_aliases::<Uniforms>(source),
            Err(LayoutError::UnresolvedAlias {
                alias: "iTouches",
                field: "touches",
                block: "Uniforms",
            })
        );
        assert_eq!(
            expand_aliases::<TouchUniforms>(source).as_deref(),
            Ok("let t = (uniforms.touches)[0];")
        );
    }

    #[test]
    fn test_referenced_aliases_dedup_in_order() {
        let names: Vec<&str> = referenced_aliases("iTime iResolution iTime foo")
            .iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, ["iTime", "iResolution"]);
    }

    #[test]
    fn test_check_aliases() {
        assert!(check_aliases::<Uniforms>("fragColor = vec4(iGlobalTime);").is_ok());
        assert!(check_aliases::<Uniforms>("vec4 t = iTouches[0];").is_err());
        assert!(check_aliases::<TouchUniforms>("vec4 t = iTouches[0];").is_ok());
    }

    #[test]
    fn test_unterminated_block_comment() {
        let source = "iTime /* iTouches";
        assert_eq!(
            expand_aliases::<Uniforms>(source).as_deref(),
            Ok("(uniforms.time) /* iTouches")
        );
    }
}
