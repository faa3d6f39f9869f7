use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Mutex;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Advance width of `text` in pixels using the first installed face of
/// `font_family`. `None` when no face could be resolved.
pub fn measure_text_width(
    text: &str,
    font_size: f32,
    font_family: &str,
    bold: bool,
) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family, bold)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn measure(
        &mut self,
        text: &str,
        font_size: f32,
        font_family: &str,
        bold: bool,
    ) -> Option<f32> {
        let face_key = face_key(font_family, bold);
        if !self.cache.contains_key(&face_key) {
            let face = self.load_face(font_family, bold, &face_key);
            if face.is_none() {
                log::debug!("no font face for '{face_key}', using width table");
            }
            self.cache.insert(face_key.clone(), face);
        }
        let face = self.cache.get_mut(&face_key).and_then(|face| face.as_mut())?;
        Some(face.measure_width(text, font_size))
    }

    fn load_face(&mut self, font_family: &str, bold: bool, face_key: &str) -> Option<FontFace> {
        if let Some(face) = load_cached_face(face_key) {
            return Some(face);
        }

        let names = family_names(font_family);
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match generic_family(name) {
                Some(generic) => generic,
                None => Family::Name(name.as_str()),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: if bold { Weight::BOLD } else { Weight::NORMAL },
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let mut loaded: Option<FontFace> = None;
        self.db.with_face_data(id, |data, index| {
            let bytes = data.to_vec();
            if Face::parse(&bytes, index).is_ok() {
                if let Some((font_path, meta_path)) = cache_paths(face_key)
                    && !font_path.exists()
                {
                    if let Some(parent) = font_path.parent() {
                        let _ = fs::create_dir_all(parent);
                    }
                    let _ = fs::write(&font_path, &bytes);
                    let _ = fs::write(&meta_path, index.to_string());
                }
                loaded = FontFace::new(bytes, index);
            }
        });
        loaded
    }
}

fn family_names(font_family: &str) -> Vec<String> {
    font_family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn generic_family(name: &str) -> Option<Family<'static>> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Some(Family::Serif),
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Some(Family::SansSerif),
        "monospace" | "ui-monospace" => Some(Family::Monospace),
        "cursive" => Some(Family::Cursive),
        "fantasy" => Some(Family::Fantasy),
        _ => None,
    }
}

/// Keeps the font bytes and fills a per-char advance table on demand, so
/// only the first lookup of a character parses the face.
struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    advances: HashMap<char, Option<u16>>,
}

impl FontFace {
    fn new(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let advances = (0x20u8..0x7f)
            .map(char::from)
            .map(|ch| (ch, glyph_advance(&face, ch)))
            .collect();
        Some(Self {
            data,
            index,
            units_per_em,
            advances,
        })
    }

    fn measure_width(&mut self, text: &str, font_size: f32) -> f32 {
        let missing: Vec<char> = text
            .chars()
            .filter(|ch| *ch != '\n' && !self.advances.contains_key(ch))
            .collect();
        if !missing.is_empty()
            && let Ok(face) = Face::parse(&self.data, self.index)
        {
            for ch in missing {
                self.advances.insert(ch, glyph_advance(&face, ch));
            }
        }

        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            match self.advances.get(&ch) {
                Some(Some(advance)) if *advance > 0 => width += *advance as f32 * scale,
                _ => width += fallback,
            }
        }
        width.max(0.0)
    }
}

fn glyph_advance(face: &Face<'_>, ch: char) -> Option<u16> {
    face.glyph_hor_advance(face.glyph_index(ch)?)
}

fn face_key(font_family: &str, bold: bool) -> String {
    let trimmed = font_family.trim();
    let family = if trimmed.is_empty() { "sans-serif" } else { trimmed };
    if bold {
        format!("{family}#bold")
    } else {
        family.to_string()
    }
}

fn cache_paths(face_key: &str) -> Option<(PathBuf, PathBuf)> {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    face_key.hash(&mut hasher);
    let hash = hasher.finish();
    let dir = base.join("moodcloud").join("font-cache");
    Some((dir.join(format!("{hash:x}.font")), dir.join(format!("{hash:x}.meta"))))
}

fn load_cached_face(face_key: &str) -> Option<FontFace> {
    let (font_path, meta_path) = cache_paths(face_key)?;
    if !font_path.exists() || !meta_path.exists() {
        return None;
    }
    let bytes = fs::read(font_path).ok()?;
    let index: u32 = fs::read_to_string(meta_path).ok()?.trim().parse().ok()?;
    FontFace::new(bytes, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_zero_width() {
        assert_eq!(measure_text_width("", 16.0, "sans-serif", false), Some(0.0));
        assert_eq!(measure_text_width("abc", 0.0, "sans-serif", false), Some(0.0));
    }

    #[test]
    fn face_key_separates_weights() {
        assert_eq!(face_key("  ", false), "sans-serif");
        assert_ne!(face_key("Arial", true), face_key("Arial", false));
    }

    fn resolve_sans_face() -> Option<(Vec<u8>, u32)> {
        let mut db = Database::new();
        db.load_system_fonts();
        let query = Query {
            families: &[Family::SansSerif],
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = db.query(&query)?;
        db.with_face_data(id, |data, index| (data.to_vec(), index))
    }

    #[test]
    fn non_ascii_width_matches_font_advances() {
        let Some((bytes, index)) = resolve_sans_face() else {
            return;
        };
        let Ok(face) = Face::parse(&bytes, index) else {
            return;
        };
        let text: String = "Ωμέγα мир ñandú"
            .chars()
            .filter(|ch| face.glyph_index(*ch).is_some())
            .collect();
        if text.chars().all(|ch| ch.is_ascii()) {
            return;
        }
        let scale = 100.0 / face.units_per_em() as f32;
        let expected: f32 = text
            .chars()
            .map(|ch| match glyph_advance(&face, ch) {
                Some(advance) if advance > 0 => advance as f32 * scale,
                _ => 56.0,
            })
            .sum();

        let mut font = FontFace::new(bytes.clone(), index).unwrap();
        let width = font.measure_width(&text, 100.0);
        assert!((width - expected).abs() < 0.01, "{width} vs {expected}");

        // Same query through the shared measurer resolves the same face.
        let measured = measure_text_width(&text, 100.0, "sans-serif", false).unwrap();
        assert!((measured - expected).abs() < 0.01, "{measured} vs {expected}");
    }

    #[test]
    fn family_names_strip_quotes() {
        assert_eq!(
            family_names("'Segoe UI', \"Arial\", sans-serif"),
            vec!["Segoe UI", "Arial", "sans-serif"]
        );
        assert!(generic_family("sans-serif").is_some());
        assert!(generic_family("Segoe UI").is_none());
    }
}
