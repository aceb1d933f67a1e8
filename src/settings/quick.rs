use crate::settings::schema::{AntiAliasingMethod, EngineSettings, GraphicsRhi};
use regex::Regex;
use std::sync::LazyLock;

const RENDERER_SECTION: &str = "[/Script/Engine.RendererSettings]";
const TARGET_SECTION: &str = "[/Script/WindowsTargetPlatform.WindowsTargetSettings]";

// One line-anchored pattern per setting, shared by decode and encode so
// both agree on which line a setting owns. Key match is case-insensitive
// for r.RayTracing only; the flag-style keys match exact case.
static RAY_TRACING: LazyLock<Regex> = LazyLock::new(|| key_line("r.RayTracing", true));
static LUMEN: LazyLock<Regex> = LazyLock::new(|| key_line("r.Lumen.DiffuseIndirect.Allow", false));
static NANITE: LazyLock<Regex> = LazyLock::new(|| key_line("r.Nanite", false));
static VIRTUAL_SHADOW_MAPS: LazyLock<Regex> =
    LazyLock::new(|| key_line("r.Shadow.Virtual.Enable", false));
static ANTI_ALIASING: LazyLock<Regex> = LazyLock::new(|| key_line("r.AntiAliasingMethod", false));
static VSYNC: LazyLock<Regex> = LazyLock::new(|| key_line("r.VSync", false));
static RHI: LazyLock<Regex> = LazyLock::new(|| key_line("DefaultGraphicsRHI", false));

fn key_line(key: &str, case_insensitive: bool) -> Regex {
    let flags = if case_insensitive { "(?mi)" } else { "(?m)" };
    Regex::new(&format!("{flags}^{}=([^\r\n]*)", regex::escape(key))).unwrap()
}

/// Extract the known settings from raw config text.
///
/// Whole-text search: the lookup is not scoped to the owning section, so
/// the first line-anchored `key=` match anywhere in the file wins. Keys
/// that do not match, or carry an unrepresentable value, are simply
/// absent from the result. Total: malformed or empty text decodes to an
/// empty record.
pub fn decode_settings(text: &str) -> EngineSettings {
    EngineSettings {
        ray_tracing: capture(&RAY_TRACING, text).and_then(parse_bool_word),
        lumen: capture(&LUMEN, text).and_then(parse_bool_flag),
        nanite: capture(&NANITE, text).and_then(parse_bool_flag),
        virtual_shadow_maps: capture(&VIRTUAL_SHADOW_MAPS, text).and_then(parse_bool_flag),
        anti_aliasing: capture(&ANTI_ALIASING, text)
            .and_then(|v| v.parse::<u8>().ok())
            .and_then(AntiAliasingMethod::from_raw),
        vsync: capture(&VSYNC, text).and_then(parse_bool_flag),
        rhi: capture(&RHI, text).and_then(GraphicsRhi::from_config_value),
    }
}

/// Write the present settings back into raw config text.
///
/// Pure text transform, no parse/serialize round trip. Per setting, in a
/// fixed order: if the owning section header is absent, append header and
/// line at end of text; else if a line for the key exists, rewrite that
/// line in place; else insert the line directly after the header. Nothing
/// else in the file moves.
///
/// Idempotent whenever the owning section header is already present: the
/// rewrite case always matches from then on. The one corner that breaks
/// strict idempotence is a key line stranded outside its section header
/// (e.g. `r.VSync=0` with no header anywhere): the first pass appends a
/// fresh section, the second pass rewrites the stray line, and output is
/// stable from the second application onward. The section-absent check
/// deliberately runs before the key search, so this is kept as is.
pub fn encode_settings(text: &str, settings: &EngineSettings) -> String {
    let mut out = text.to_string();
    if let Some(v) = settings.ray_tracing {
        let value = if v { "True" } else { "False" };
        out = apply_one(out, RENDERER_SECTION, &RAY_TRACING, "r.RayTracing", value);
    }
    if let Some(v) = settings.lumen {
        out = apply_one(
            out,
            RENDERER_SECTION,
            &LUMEN,
            "r.Lumen.DiffuseIndirect.Allow",
            flag(v),
        );
    }
    if let Some(v) = settings.nanite {
        out = apply_one(out, RENDERER_SECTION, &NANITE, "r.Nanite", flag(v));
    }
    if let Some(v) = settings.virtual_shadow_maps {
        out = apply_one(
            out,
            RENDERER_SECTION,
            &VIRTUAL_SHADOW_MAPS,
            "r.Shadow.Virtual.Enable",
            flag(v),
        );
    }
    if let Some(v) = settings.anti_aliasing {
        out = apply_one(
            out,
            RENDERER_SECTION,
            &ANTI_ALIASING,
            "r.AntiAliasingMethod",
            &v.as_raw().to_string(),
        );
    }
    if let Some(v) = settings.vsync {
        out = apply_one(out, RENDERER_SECTION, &VSYNC, "r.VSync", flag(v));
    }
    if let Some(v) = settings.rhi {
        out = apply_one(
            out,
            TARGET_SECTION,
            &RHI,
            "DefaultGraphicsRHI",
            v.as_config_value(),
        );
    }
    out
}

fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

fn parse_bool_word(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_bool_flag(value: &str) -> Option<bool> {
    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

fn flag(v: bool) -> &'static str {
    if v {
        "1"
    } else {
        "0"
    }
}

/// Apply a single setting to the text: append section, rewrite the first
/// matching line, or insert after the header, per the case analysis
/// above. The rewrite splices `key=value` over the whole matched line,
/// not just the value span, so a touched line comes out canonical; for
/// the one case-insensitive key this also normalizes its casing
/// (`R.RAYTRACING=TRUE` becomes `r.RayTracing=...`).
fn apply_one(text: String, section: &str, line: &Regex, key: &str, value: &str) -> String {
    if !text.contains(section) {
        let mut out = text;
        out.push_str("\n\n");
        out.push_str(section);
        out.push('\n');
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        return out;
    }

    if let Some(found) = line.find(&text) {
        let mut out = String::with_capacity(text.len() + key.len() + value.len() + 1);
        out.push_str(&text[..found.start()]);
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push_str(&text[found.end()..]);
        return out;
    }

    let insert_at = match text.find(section) {
        Some(pos) => pos + section.len(),
        None => text.len(),
    };
    let mut out = String::with_capacity(text.len() + key.len() + value.len() + 2);
    out.push_str(&text[..insert_at]);
    out.push('\n');
    out.push_str(key);
    out.push('=');
    out.push_str(value);
    out.push_str(&text[insert_at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_extracts_present_settings_only() {
        let text = "[/Script/Engine.RendererSettings]\nr.Nanite=1\nr.RayTracing=False\n";
        let settings = decode_settings(text);
        assert_eq!(settings.nanite, Some(true));
        assert_eq!(settings.ray_tracing, Some(false));
        assert_eq!(settings.lumen, None);
        assert_eq!(settings.virtual_shadow_maps, None);
        assert_eq!(settings.anti_aliasing, None);
        assert_eq!(settings.vsync, None);
        assert_eq!(settings.rhi, None);
    }

    #[test]
    fn decode_empty_text_is_empty_record() {
        assert!(decode_settings("").is_empty());
    }

    #[test]
    fn decode_ray_tracing_is_case_insensitive() {
        let settings = decode_settings("R.RAYTRACING=TRUE\n");
        assert_eq!(settings.ray_tracing, Some(true));
    }

    #[test]
    fn decode_flag_keys_are_case_sensitive() {
        assert_eq!(decode_settings("r.nanite=1\n").nanite, None);
        assert_eq!(decode_settings("r.Nanite=1\n").nanite, Some(true));
    }

    #[test]
    fn decode_ignores_unrepresentable_values() {
        let text = "r.AntiAliasingMethod=3\nr.Nanite=yes\nDefaultGraphicsRHI=DefaultGraphicsRHI_Metal\n";
        let settings = decode_settings(text);
        assert!(settings.is_empty());
    }

    #[test]
    fn decode_accepts_each_anti_aliasing_method() {
        for (raw, method) in [
            ("0", AntiAliasingMethod::None),
            ("1", AntiAliasingMethod::Fxaa),
            ("2", AntiAliasingMethod::Taa),
            ("4", AntiAliasingMethod::Tsr),
        ] {
            let text = format!("r.AntiAliasingMethod={raw}\n");
            assert_eq!(decode_settings(&text).anti_aliasing, Some(method));
        }
    }

    #[test]
    fn decode_key_must_start_its_line() {
        // `xr.Nanite=1` must not match r.Nanite.
        assert_eq!(decode_settings("xr.Nanite=1\n").nanite, None);
    }

    #[test]
    fn decode_rhi_verbatim() {
        let text = "[/Script/WindowsTargetPlatform.WindowsTargetSettings]\nDefaultGraphicsRHI=DefaultGraphicsRHI_Vulkan\n";
        assert_eq!(decode_settings(text).rhi, Some(GraphicsRhi::Vulkan));
    }

    #[test]
    fn encode_creates_missing_section() {
        let out = encode_settings(
            "",
            &EngineSettings {
                nanite: Some(true),
                ..Default::default()
            },
        );
        let header = out.find("[/Script/Engine.RendererSettings]").unwrap();
        let key = out.find("r.Nanite=1").unwrap();
        assert!(header < key);
    }

    #[test]
    fn encode_rewrites_existing_line_in_place() {
        let text = "[/Script/Engine.RendererSettings]\nr.Foo=Bar\nr.Nanite=0\n";
        let out = encode_settings(
            text,
            &EngineSettings {
                nanite: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(
            out,
            "[/Script/Engine.RendererSettings]\nr.Foo=Bar\nr.Nanite=1\n"
        );
    }

    #[test]
    fn encode_inserts_after_existing_header() {
        let text = "[/Script/Engine.RendererSettings]\nr.Foo=Bar\n";
        let out = encode_settings(
            text,
            &EngineSettings {
                vsync: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(
            out,
            "[/Script/Engine.RendererSettings]\nr.VSync=0\nr.Foo=Bar\n"
        );
    }

    #[test]
    fn encode_is_idempotent() {
        let text = "[Other]\nkeep=me\n";
        let settings = EngineSettings {
            ray_tracing: Some(true),
            nanite: Some(true),
            anti_aliasing: Some(AntiAliasingMethod::Tsr),
            rhi: Some(GraphicsRhi::Dx12),
            ..Default::default()
        };
        let once = encode_settings(text, &settings);
        let twice = encode_settings(&once, &settings);
        assert_eq!(once, twice);
    }

    #[test]
    fn stray_key_without_header_settles_after_second_pass() {
        // A key line with no owning section header anywhere: the first
        // pass appends a fresh section (the section-absent check runs
        // before the key search), the second rewrites the stray line,
        // and from then on output is stable.
        let settings = EngineSettings {
            vsync: Some(true),
            ..Default::default()
        };
        let once = encode_settings("r.VSync=0\n", &settings);
        assert_eq!(
            once,
            "r.VSync=0\n\n\n[/Script/Engine.RendererSettings]\nr.VSync=1"
        );

        let twice = encode_settings(&once, &settings);
        assert_ne!(once, twice);
        assert_eq!(
            twice,
            "r.VSync=1\n\n\n[/Script/Engine.RendererSettings]\nr.VSync=1"
        );

        let thrice = encode_settings(&twice, &settings);
        assert_eq!(twice, thrice);
    }

    #[test]
    fn encode_canonicalizes_ray_tracing_casing() {
        let text = "[/Script/Engine.RendererSettings]\nR.RAYTRACING=TRUE\n";
        let out = encode_settings(
            text,
            &EngineSettings {
                ray_tracing: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(
            out,
            "[/Script/Engine.RendererSettings]\nr.RayTracing=False\n"
        );
    }

    #[test]
    fn encode_touches_only_the_first_match() {
        let text = "r.VSync=0\nr.VSync=0\n";
        let out = encode_settings(
            text,
            &EngineSettings {
                vsync: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(out, "r.VSync=1\nr.VSync=0\n");
    }

    #[test]
    fn encode_preserves_crlf_tail_of_rewritten_line() {
        let text = "[/Script/Engine.RendererSettings]\r\nr.Nanite=0\r\n";
        let out = encode_settings(
            text,
            &EngineSettings {
                nanite: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(out, "[/Script/Engine.RendererSettings]\r\nr.Nanite=1\r\n");
    }

    #[test]
    fn encode_groups_new_settings_under_one_header() {
        let out = encode_settings(
            "",
            &EngineSettings {
                nanite: Some(true),
                vsync: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(
            out,
            "\n\n[/Script/Engine.RendererSettings]\nr.VSync=1\nr.Nanite=1"
        );
    }

    #[test]
    fn encode_round_trips_through_decode() {
        let settings = EngineSettings {
            ray_tracing: Some(true),
            lumen: Some(false),
            nanite: Some(true),
            virtual_shadow_maps: Some(false),
            anti_aliasing: Some(AntiAliasingMethod::Taa),
            vsync: Some(true),
            rhi: Some(GraphicsRhi::Dx11),
        };
        let out = encode_settings("", &settings);
        assert_eq!(decode_settings(&out), settings);
    }

    #[test]
    fn encode_empty_settings_is_identity() {
        let text = "[Whatever]\nkey=value\n";
        assert_eq!(encode_settings(text, &EngineSettings::default()), text);
    }
}
